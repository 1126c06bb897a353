//! Barcode sizing: how many modules a payload needs and how large each
//! module may be printed so the symbol fits a box given in dots.

mod code128;
mod fit;
mod qr;

use label_model::{LinearSymbology, MatrixSymbology, Symbology};
use thiserror::Error;

pub use code128::CODE128_QUIET_ZONE;
pub use fit::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarcodeError {
    #[error("barcode encoder rejected payload: {0}")]
    Encode(String),
}

impl From<rxing::Exceptions> for BarcodeError {
    fn from(value: rxing::Exceptions) -> Self {
        BarcodeError::Encode(value.to_string())
    }
}

/// Intrinsic width of the symbol in modules: unit magnification, no
/// margin, no human readable line.
pub fn module_count(payload: &str, symbology: impl Into<Symbology>) -> Result<u32, BarcodeError> {
    let matrix = match symbology.into() {
        Symbology::Linear(LinearSymbology::Code128) => code128::encode_bare(payload)?,
        Symbology::Matrix(MatrixSymbology::Qr) => qr::encode_bare(payload)?,
    };
    Ok(matrix.width())
}

/// [`module_count`] that never fails. A payload the encoder cannot
/// represent counts as a single module so sizing still yields a printable
/// (if oversized) symbol.
pub fn module_count_or_min(payload: &str, symbology: impl Into<Symbology>) -> u32 {
    let symbology = symbology.into();
    match module_count(payload, symbology) {
        Ok(0) => 1,
        Ok(modules) => modules,
        Err(err) => {
            log::warn!("cannot measure {symbology:?} payload {payload:?}: {err}, assuming 1 module");
            1
        }
    }
}

/// Fits a Code 128 symbol into a `width_dots` x `height_dots` box.
pub fn fit_code128(payload: &str, width_dots: u32, height_dots: u32) -> LinearFit {
    let modules = module_count_or_min(payload, LinearSymbology::Code128);
    fit_linear(modules, CODE128_QUIET_ZONE, width_dots, height_dots)
}

/// Fits a QR symbol into a `width_dots` wide square.
pub fn fit_qr(payload: &str, width_dots: u32) -> MatrixFit {
    let modules = module_count_or_min(payload, MatrixSymbology::Qr);
    fit_matrix(modules, width_dots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_count_is_deterministic_test() {
        let first = module_count("0123456789", LinearSymbology::Code128).unwrap();
        for _ in 0..5 {
            assert_eq!(
                module_count("0123456789", LinearSymbology::Code128).unwrap(),
                first
            );
        }
        let qr = module_count("HELLO", MatrixSymbology::Qr).unwrap();
        assert_eq!(module_count("HELLO", MatrixSymbology::Qr).unwrap(), qr);
    }

    #[test]
    fn code128_scenario_test() {
        let modules = module_count("0123456789", LinearSymbology::Code128).unwrap();
        let fit = fit_code128("0123456789", 200, 80);
        assert_eq!(fit.module_width, (200 / (modules + CODE128_QUIET_ZONE)).max(1));
        assert!((modules + CODE128_QUIET_ZONE) * fit.module_width <= 200);
        assert_eq!(fit.height_dots, 80);
    }

    #[test]
    fn empty_payload_falls_back_test() {
        assert!(module_count("", LinearSymbology::Code128).is_err());
        assert_eq!(module_count_or_min("", LinearSymbology::Code128), 1);
        assert_eq!(module_count_or_min("", MatrixSymbology::Qr), 1);
    }

    #[test]
    fn fit_qr_never_exceeds_box_test() {
        for payload in ["A", "HELLO", "https://example.com/some/longer/path?q=1"] {
            let modules = module_count(payload, MatrixSymbology::Qr).unwrap();
            for width in modules..modules * 12 {
                let fit = fit_qr(payload, width);
                assert!(fit.realized_dots <= width);
                assert_eq!(fit.realized_dots, modules * fit.magnification);
            }
        }
    }
}
