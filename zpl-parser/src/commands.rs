/// `^FOx,y`, in dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldOrigin {
    pub x: u32,
    pub y: u32,
}

/// Raw `^GFA` parameters. The data stays encoded, hex or `:Z64:` framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicField {
    pub data_bytes: usize,
    pub total_bytes: usize,
    pub bytes_per_row: usize,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBody {
    /// `^A0N,h,w^FD...`
    Font,
    /// `^GFA,...^FXTEXT,h,w,...`
    Bitmap(GraphicField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub origin: FieldOrigin,
    pub height: u32,
    pub width: u32,
    pub content: String,
    pub body: TextBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code128Field {
    pub origin: FieldOrigin,
    pub module_width: u32,
    pub height: u32,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrField {
    pub origin: FieldOrigin,
    pub magnification: u32,
    pub data: String,
}

/// `^GBw,h,t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicBox {
    pub origin: FieldOrigin,
    pub width: u32,
    pub height: u32,
    pub thickness: u32,
}

/// An outer border followed by its inner grid lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableField {
    pub border: GraphicBox,
    /// x of each vertical line, left to right as emitted
    pub verticals: Vec<u32>,
    /// y of each horizontal line
    pub horizontals: Vec<u32>,
}

impl TableField {
    pub fn rows(&self) -> u32 {
        self.horizontals.len() as u32 + 1
    }

    pub fn cols(&self) -> u32 {
        self.verticals.len() as u32 + 1
    }
}

/// One recognized field, at dot resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZplField {
    Text(TextField),
    Code128(Code128Field),
    Qr(QrField),
    Table(TableField),
}

impl ZplField {
    pub fn origin(&self) -> FieldOrigin {
        match self {
            ZplField::Text(field) => field.origin,
            ZplField::Code128(field) => field.origin,
            ZplField::Qr(field) => field.origin,
            ZplField::Table(field) => field.border.origin,
        }
    }
}
