//! Turns recognized ZPL fields back into millimetre label elements.

mod graphic;
mod options;

use label_barcode::{CODE128_QUIET_ZONE, module_count_or_min};
use label_model::{
    Barcode1D, Barcode2D, Dpi, Element, LinearSymbology, MatrixSymbology, Table, TextElement,
    dots_to_mm,
};
use zpl_parser::{FieldOrigin, TextBody, ZplField};

pub use crate::options::{FootprintSource, ParseOptions, ReferenceFootprints};

/// Dots to millimetres, `None` past what a print position can hold.
fn mm(dots: u32, dpi: Dpi) -> Option<f64> {
    i32::try_from(dots).ok().map(|dots| dots_to_mm(dots, dpi))
}

fn origin_mm(origin: FieldOrigin, dpi: Dpi) -> Option<(f64, f64)> {
    Some((mm(origin.x, dpi)?, mm(origin.y, dpi)?))
}

/// Builds one element and the extent a text element occupies, or `None`
/// when the field is malformed.
fn reconstruct(
    field: &ZplField,
    dpi: Dpi,
    options: &ParseOptions,
) -> Option<(Element, (f64, f64))> {
    let stream = options.footprint == FootprintSource::Stream;
    let mut text_extent = options.reference.text;
    let (x_mm, y_mm) = origin_mm(field.origin(), dpi)?;

    let element = match field {
        ZplField::Text(text) => {
            if let TextBody::Bitmap(graphic) = &text.body {
                match graphic::decode_field(graphic) {
                    Ok(bitmap) if stream => {
                        text_extent = (
                            mm(bitmap.width.try_into().ok()?, dpi)?,
                            mm(bitmap.height.try_into().ok()?, dpi)?,
                        );
                    }
                    Ok(_) => {}
                    Err(err) => {
                        log::debug!("skipping text {:?}: {err}", text.content);
                        return None;
                    }
                }
            }
            TextElement::new(text.content.clone(), x_mm, y_mm)
                .with_size(text.height, text.width)
                .into()
        }
        ZplField::Code128(barcode) => {
            let (width_mm, height_mm) = match stream {
                true => {
                    let modules = module_count_or_min(&barcode.data, LinearSymbology::Code128);
                    let width = (modules + CODE128_QUIET_ZONE)
                        .checked_mul(barcode.module_width.max(1))
                        .and_then(|width| mm(width, dpi));
                    (width?, mm(barcode.height, dpi)?)
                }
                false => options.reference.linear,
            };
            Barcode1D::code128(barcode.data.clone(), x_mm, y_mm, width_mm, height_mm).into()
        }
        ZplField::Qr(qr) => {
            let magnification = qr.magnification.max(1);
            let size_mm = match stream {
                true => {
                    let modules = module_count_or_min(&qr.data, MatrixSymbology::Qr);
                    modules
                        .checked_mul(magnification)
                        .and_then(|size| mm(size, dpi))?
                }
                false => options.reference.matrix,
            };
            let mut barcode = Barcode2D::qr(qr.data.clone(), x_mm, y_mm, size_mm);
            barcode.magnification = magnification;
            barcode.into()
        }
        ZplField::Table(table) => {
            let border = table.border;
            let mut element = Table::new(
                x_mm,
                y_mm,
                table.rows(),
                table.cols(),
                mm(border.width, dpi)? / table.cols() as f64,
                mm(border.height, dpi)? / table.rows() as f64,
            );
            element.line_thickness_dots = border.thickness;
            element.into()
        }
    };
    Some((element, text_extent))
}

/// Reconstructs elements in field order. Fields that do not make a valid
/// element are skipped.
pub fn interpret(fields: &[ZplField], dpi: Dpi, options: &ParseOptions) -> Vec<Element> {
    fields
        .iter()
        .filter_map(|field| {
            let Some((mut element, text_extent)) = reconstruct(field, dpi, options) else {
                log::debug!("skipping out of range field at {:?}", field.origin());
                return None;
            };
            if let Err(err) = element.validate() {
                log::debug!("skipping {} at {:?}: {err}", element.kind(), field.origin());
                return None;
            }
            if let Some(paper) = &options.bounds {
                element.clamp_to(paper, text_extent);
            }
            log::debug!("{} at {:?} mm", element.kind(), element.origin_mm());
            Some(element)
        })
        .collect()
}
