use std::fmt::Write;

use crate::{CommandWriter, Placed, WriteError, escape_pgl_string};

pub const START_MARKER: &str = "<PGL_START>";
pub const END_MARKER: &str = "<PGL_END>";

/// Emits the PGL statement vocabulary. Text is always sent as a string
/// statement, the printer renders it with its own font.
#[derive(Debug, Clone, Copy, Default)]
pub struct PglWriter;

impl CommandWriter for PglWriter {
    fn begin<W: Write>(&self, out: &mut W) -> Result<(), WriteError> {
        writeln!(out, "{START_MARKER}")?;
        Ok(())
    }

    fn element<W: Write>(&self, placed: &Placed<'_>, out: &mut W) -> Result<(), WriteError> {
        match placed {
            Placed::Text {
                x,
                y,
                content,
                height_dots,
                width_dots,
            } => writeln!(
                out,
                "TEXT {x},{y},{height_dots},{width_dots},\"{}\";",
                escape_pgl_string(content)
            )?,
            Placed::Code128 { x, y, payload, fit } => writeln!(
                out,
                "BARCODE1D CODE128 {x},{y},{},{},\"{}\";",
                fit.module_width,
                fit.height_dots,
                escape_pgl_string(payload)
            )?,
            Placed::Qr { x, y, payload, fit } => writeln!(
                out,
                "BARCODE2D QR {x},{y},{},\"{}\";",
                fit.magnification,
                escape_pgl_string(payload)
            )?,
            Placed::Table(table) => {
                let t = table.thickness;
                let (x, y) = (table.x, table.y);
                let (w, h) = (table.width, table.height);
                writeln!(out, "RECT {x},{y},{w},{h},{t};")?;
                for vx in &table.verticals {
                    writeln!(out, "LINE {vx},{y} TO {vx},{},{t};", y + h)?;
                }
                for hy in &table.horizontals {
                    writeln!(out, "LINE {x},{hy} TO {},{hy},{t};", x + w)?;
                }
            }
        }
        Ok(())
    }

    fn end<W: Write>(&self, out: &mut W) -> Result<(), WriteError> {
        write!(out, "{END_MARKER}")?;
        Ok(())
    }
}
