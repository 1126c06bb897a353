use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till, take_until},
    character::complete::{char, digit1, multispace0, satisfy, u32 as parse_u32},
    combinator::{map, map_opt, opt, recognize, verify},
    multi::many0,
    sequence::{delimited, preceded, terminated},
};

use crate::{
    Code128Field, FieldOrigin, GraphicBox, GraphicField, ParseError, QrField,
    TableField, TextBody, TextField, ZplField,
};

/// Indicator used by `^FH` when none is given.
pub const FIELD_HEX_INDICATOR: char = '_';

const TEXT_COMMENT_TAG: &str = "TEXT";
const QR_MODE_MARKERS: [&str; 2] = ["MA,", "MM,A"];

/// Replaces `<indicator>XX` hex escapes with the byte they encode.
pub fn decode_field_hex(data: &str, indicator: char) -> String {
    if !indicator.is_ascii() {
        return data.to_string();
    }
    let indicator = indicator as u8;
    let bytes = data.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = match bytes.get(i + 1..i + 3) {
            Some(pair) if bytes[i] == indicator && pair.iter().all(u8::is_ascii_hexdigit) => {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            }
            _ => None,
        };
        match escaped {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn parse_count(input: &str) -> IResult<&str, usize> {
    map(parse_u32, |n| n as usize).parse(input)
}

pub(crate) fn parse_fo(input: &str) -> IResult<&str, FieldOrigin> {
    let (input, (_, x, _, y)) = (tag("^FO"), parse_u32, char(','), parse_u32).parse(input)?;
    Ok((input, FieldOrigin { x, y }))
}

/// `^FH` with its indicator, `_` when omitted.
fn parse_fh(input: &str) -> IResult<&str, char> {
    let (input, indicator) =
        preceded(tag("^FH"), opt(satisfy(|c: char| c != '^' && c != ','))).parse(input)?;
    Ok((input, indicator.unwrap_or(FIELD_HEX_INDICATOR)))
}

/// `[^FH_]^FD<data>^FS`, with the data unescaped.
fn parse_field_data(input: &str) -> IResult<&str, String> {
    let (input, indicator) = opt(parse_fh).parse(input)?;
    let (input, data) = delimited(tag("^FD"), take_until("^FS"), tag("^FS")).parse(input)?;
    let data = match indicator {
        Some(indicator) => decode_field_hex(data, indicator),
        None => data.to_string(),
    };
    Ok((input, data))
}

pub(crate) fn parse_gf(input: &str) -> IResult<&str, GraphicField> {
    let (input, (_, data_bytes, _, total_bytes, _, bytes_per_row, _, data)) = (
        tag("^GFA,"),
        parse_count,
        char(','),
        parse_count,
        char(','),
        parse_count,
        char(','),
        take_till(|c: char| c == '^'),
    )
        .parse(input)?;

    Ok((
        input,
        GraphicField {
            data_bytes,
            total_bytes,
            bytes_per_row,
            data: data.trim_end().to_string(),
        },
    ))
}

/// `^FXTEXT,h,w,<escaped text>^FS`
fn parse_text_comment(input: &str) -> IResult<&str, (u32, u32, String)> {
    let (input, (_, _, height, _, width, _, text, _)) = (
        tag("^FX"),
        terminated(tag(TEXT_COMMENT_TAG), char(',')),
        parse_u32,
        char(','),
        parse_u32,
        char(','),
        take_until("^FS"),
        tag("^FS"),
    )
        .parse(input)?;
    Ok((
        input,
        (height, width, decode_field_hex(text, FIELD_HEX_INDICATOR)),
    ))
}

/// `^A<font>N,h,w`
fn parse_font(input: &str) -> IResult<&str, (u32, u32)> {
    let (input, (_, _, _, height, _, width)) = (
        tag("^A"),
        satisfy(|c: char| c.is_ascii_alphanumeric()),
        tag("N,"),
        parse_u32,
        char(','),
        parse_u32,
    )
        .parse(input)?;
    Ok((input, (height, width)))
}

fn bitmap_text(input: &str) -> IResult<&str, TextField> {
    let (input, (origin, graphic, (height, width, content))) =
        (parse_fo, parse_gf, parse_text_comment).parse(input)?;
    Ok((
        input,
        TextField {
            origin,
            height,
            width,
            content,
            body: TextBody::Bitmap(graphic),
        },
    ))
}

fn font_text(input: &str) -> IResult<&str, TextField> {
    let (input, (origin, (height, width), content)) =
        (parse_fo, parse_font, parse_field_data).parse(input)?;
    Ok((
        input,
        TextField {
            origin,
            height,
            width,
            content,
            body: TextBody::Font,
        },
    ))
}

pub fn text_field(input: &str) -> IResult<&str, TextField> {
    alt((bitmap_text, font_text)).parse(input)
}

/// `^FOx,y^BYmw,ratio,h^BCN,h,...[^FH_]^FD<data>^FS`
pub fn code128_field(input: &str) -> IResult<&str, Code128Field> {
    let (input, (origin, _, module_width, _, _, _, _)) = (
        parse_fo,
        tag("^BY"),
        parse_u32,
        char(','),
        recognize((digit1, opt((char('.'), digit1)))),
        char(','),
        parse_u32,
    )
        .parse(input)?;
    let (input, (_, height, _, data)) = (
        tag("^BCN,"),
        parse_u32,
        take_till(|c: char| c == '^'),
        parse_field_data,
    )
        .parse(input)?;

    Ok((
        input,
        Code128Field {
            origin,
            module_width,
            height,
            data,
        },
    ))
}

fn strip_qr_marker(data: String) -> Option<String> {
    QR_MODE_MARKERS
        .iter()
        .find_map(|marker| data.strip_prefix(marker))
        .map(str::to_string)
}

/// `^FOx,y^BQN,2,mag[^FH_]^FDMA,<data>^FS`
pub fn qr_field(input: &str) -> IResult<&str, QrField> {
    let (input, (origin, _, magnification, data)) = (
        parse_fo,
        tag("^BQN,2,"),
        parse_u32,
        map_opt(parse_field_data, strip_qr_marker),
    )
        .parse(input)?;

    Ok((
        input,
        QrField {
            origin,
            magnification,
            data,
        },
    ))
}

pub(crate) fn parse_gb(input: &str) -> IResult<&str, GraphicBox> {
    let (input, (origin, _, width, _, height, _, thickness, _)) = (
        parse_fo,
        tag("^GB"),
        parse_u32,
        char(','),
        parse_u32,
        char(','),
        parse_u32,
        tag("^FS"),
    )
        .parse(input)?;

    Ok((
        input,
        GraphicBox {
            origin,
            width,
            height,
            thickness,
        },
    ))
}

/// A border box followed by the vertical and then the horizontal lines
/// that split it. A border without lines is a single cell.
pub fn table_field(input: &str) -> IResult<&str, TableField> {
    let (input, border) = parse_gb(input)?;
    let t = border.thickness;

    let (input, verticals) = many0(map(
        verify(preceded(multispace0, parse_gb), |line: &GraphicBox| {
            line.origin.y == border.origin.y
                && line.origin.x > border.origin.x
                && line.width == t
                && line.height == border.height
                && line.thickness == t
        }),
        |line| line.origin.x,
    ))
    .parse(input)?;

    let (input, horizontals) = many0(map(
        verify(preceded(multispace0, parse_gb), |line: &GraphicBox| {
            line.origin.x == border.origin.x
                && line.origin.y > border.origin.y
                && line.width == border.width
                && line.height == t
                && line.thickness == t
        }),
        |line| line.origin.y,
    ))
    .parse(input)?;

    Ok((
        input,
        TableField {
            border,
            verticals,
            horizontals,
        },
    ))
}

/// Any one field the writer emits.
fn any_field(input: &str) -> IResult<&str, ZplField> {
    alt((
        map(text_field, ZplField::Text),
        map(code128_field, ZplField::Code128),
        map(qr_field, ZplField::Qr),
        map(table_field, ZplField::Table),
    ))
    .parse(input)
}

fn parse_envelope(input: &str) -> IResult<&str, &str> {
    preceded(
        (take_until("^XA"), tag("^XA")),
        terminated(take_until("^XZ"), tag("^XZ")),
    )
    .parse(input)
}

/// The text between `^XA` and `^XZ`.
pub fn label_body(input: &str) -> Result<&str, ParseError> {
    parse_envelope(input)
        .map(|(_, body)| body)
        .map_err(|_| ParseError::MissingEnvelope)
}

/// Parses exactly one field, leading whitespace allowed.
pub fn parse_field(input: &str) -> Result<ZplField, ParseError> {
    let (_, field) = any_field(input.trim_start())?;
    Ok(field)
}

/// Runs `recognizer` at every field origin of `input`. A match consumes
/// the whole field, a miss moves on to the next `^FO`.
fn scan<'a, O>(
    input: &'a str,
    mut recognizer: impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
    mut on_miss: impl FnMut(&'a str),
) -> Vec<O> {
    let mut found = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("^FO") {
        let field = &rest[start..];
        match recognizer.parse(field) {
            Ok((remaining, output)) => {
                found.push(output);
                rest = remaining;
            }
            Err(_) => {
                on_miss(field);
                rest = &field[3..];
            }
        }
    }
    found
}

fn field_head(field: &str) -> &str {
    let end = field
        .match_indices("^FS")
        .next()
        .map(|(i, _)| i + 3)
        .unwrap_or(field.len());
    let head = &field[..end];
    match head.char_indices().nth(48) {
        Some((i, _)) => &head[..i],
        None => head,
    }
}

/// Recognizes every field family in turn: texts, Code 128, QR, tables.
/// Results are in that family order, each family in stream order.
/// Unrecognized fields are skipped.
pub fn parse_zpl(input: &str) -> Vec<ZplField> {
    let body = match label_body(input) {
        Ok(body) => body,
        Err(err) => {
            log::debug!("{err}, scanning the whole input");
            input
        }
    };

    let recognized = scan(body, any_field, |field| {
        log::debug!("skipping unrecognized field {:?}", field_head(field))
    })
    .len();

    let mut fields: Vec<ZplField> = scan(body, text_field, |_| {})
        .into_iter()
        .map(ZplField::Text)
        .collect();
    fields.extend(scan(body, code128_field, |_| {}).into_iter().map(ZplField::Code128));
    fields.extend(scan(body, qr_field, |_| {}).into_iter().map(ZplField::Qr));
    fields.extend(scan(body, table_field, |_| {}).into_iter().map(ZplField::Table));
    log::debug!("recognized {recognized} fields");
    fields
}
