//! SVG serialization of finalized vector documents.
//!
//! The exact path syntax is unimportant as long as any standard SVG
//! renderer reproduces the document's stacking order; elements are written
//! strictly in command order.

use crate::page::{DrawCommand, LineCommand, PathCommand, PathSegment, RectCommand, VectorDocument};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serialize a document as an SVG image.
pub fn write_svg<W: io::Write>(doc: &VectorDocument, out: W) -> io::Result<()> {
    let mut writer = Writer::new(out);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NS));
    svg.push_attribute(("version", "1.1"));
    svg.push_attribute(("width", num(doc.width()).as_str()));
    svg.push_attribute(("height", num(doc.height()).as_str()));
    svg.push_attribute((
        "viewBox",
        format!("0 0 {} {}", num(doc.width()), num(doc.height())).as_str(),
    ));
    writer.write_event(Event::Start(svg))?;

    for command in doc.commands() {
        let element = match command {
            DrawCommand::Rect(rect) => rect_element(rect),
            DrawCommand::Line(line) => line_element(line),
            DrawCommand::Path(path) => path_element(path),
        };
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(())
}

/// Serialize a document into an owned SVG string.
pub fn svg_string(doc: &VectorDocument) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_svg(doc, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn rect_element(rect: &RectCommand) -> BytesStart<'static> {
    let mut element = BytesStart::new("rect");
    element.push_attribute(("x", num(rect.x).as_str()));
    element.push_attribute(("y", num(rect.y).as_str()));
    element.push_attribute(("width", num(rect.width).as_str()));
    element.push_attribute(("height", num(rect.height).as_str()));
    element.push_attribute(("fill", rect.fill.to_string().as_str()));
    element
}

fn line_element(line: &LineCommand) -> BytesStart<'static> {
    let mut element = BytesStart::new("line");
    element.push_attribute(("x1", num(line.x1).as_str()));
    element.push_attribute(("y1", num(line.y1).as_str()));
    element.push_attribute(("x2", num(line.x2).as_str()));
    element.push_attribute(("y2", num(line.y2).as_str()));
    element.push_attribute(("stroke", line.stroke.to_string().as_str()));
    element.push_attribute(("stroke-width", num(line.width).as_str()));
    element
}

fn path_element(path: &PathCommand) -> BytesStart<'static> {
    let mut element = BytesStart::new("path");
    element.push_attribute(("d", path_data(path).as_str()));
    element.push_attribute(("fill", "none"));
    element.push_attribute(("stroke", path.stroke.to_string().as_str()));
    element.push_attribute(("stroke-width", num(path.width).as_str()));
    element.push_attribute(("stroke-linecap", "round"));
    element
}

fn path_data(path: &PathCommand) -> String {
    let mut data = String::with_capacity(path.segments.len() * 12);
    for segment in &path.segments {
        if !data.is_empty() {
            data.push(' ');
        }
        match segment {
            PathSegment::MoveTo(x, y) => {
                data.push('M');
                data.push_str(&num(*x));
                data.push(',');
                data.push_str(&num(*y));
            }
            PathSegment::LineTo(x, y) => {
                data.push('L');
                data.push_str(&num(*x));
                data.push(',');
                data.push_str(&num(*y));
            }
        }
    }
    data
}

fn num(value: f32) -> String {
    format!("{}", value)
}
