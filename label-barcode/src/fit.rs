/// Largest module width a ZPL `^BY` accepts.
pub const MAX_MODULE_WIDTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearFit {
    pub module_width: u32,
    pub height_dots: u32,
    /// Printed width including the quiet zone.
    pub realized_width_dots: u32,
}

impl LinearFit {
    /// True when even a one dot module does not fit the requested width.
    pub fn overflows(&self, width_dots: u32) -> bool {
        self.realized_width_dots > width_dots
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixFit {
    pub magnification: u32,
    pub realized_dots: u32,
}

/// Widest module width, counting up from 1, for which
/// `(modules + quiet_zone) * width` stays within `width_dots`. Falls back to
/// 1 when nothing fits, in which case the symbol overflows the box.
pub fn fit_linear(modules: u32, quiet_zone: u32, width_dots: u32, height_dots: u32) -> LinearFit {
    let total = modules.max(1) + quiet_zone;
    let module_width = (1..=MAX_MODULE_WIDTH)
        .take_while(|mw| total * mw <= width_dots)
        .last()
        .unwrap_or(1);

    LinearFit {
        module_width,
        height_dots,
        realized_width_dots: total * module_width,
    }
}

/// `max(1, floor(width_dots / modules))`. The realized size never exceeds
/// the box unless the box is narrower than the bare symbol.
pub fn fit_matrix(modules: u32, width_dots: u32) -> MatrixFit {
    let modules = modules.max(1);
    let magnification = (width_dots / modules).max(1);
    MatrixFit {
        magnification,
        realized_dots: modules * magnification,
    }
}
