//! Pascal-VOC style ground-truth annotations
//!
//! Only the parts the evaluator needs are read:
//!
//! ```xml
//! <annotation>
//!   <filename>01_missing_hole_01.jpg</filename>
//!   <size><width>3034</width><height>1586</height><depth>3</depth></size>
//!   <object>
//!     <name>missing_hole</name>
//!     <bndbox><xmin>2459</xmin><ymin>1274</ymin><xmax>2530</xmax><ymax>1329</ymax></bndbox>
//!   </object>
//! </annotation>
//! ```
//!
//! Box corners are inclusive pixel coordinates.

use crate::{EvalError, EvalResult};
use boardcheck_core::Rect;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::path::Path;

/// One labeled box
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnnotatedObject {
    /// Defect class, e.g. `missing_hole`
    pub name: String,
    pub bounds: Rect,
}

/// Ground truth of one image
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Annotation {
    pub filename: Option<String>,
    /// `(width, height)` when the document declares it
    pub size: Option<(u32, u32)>,
    pub objects: Vec<AnnotatedObject>,
}

impl Annotation {
    /// Boxes of every object, in document order.
    pub fn boxes(&self) -> Vec<Rect> {
        self.objects.iter().map(|o| o.bounds).collect()
    }

    /// Boxes of the objects with the given class name.
    pub fn boxes_named(&self, name: &str) -> Vec<Rect> {
        self.objects
            .iter()
            .filter(|o| o.name == name)
            .map(|o| o.bounds)
            .collect()
    }
}

#[derive(Default)]
struct PendingObject {
    name: Option<String>,
    corners: [Option<String>; 4],
}

const CORNERS: [&str; 4] = ["xmin", "ymin", "xmax", "ymax"];

fn parse_coord(object: usize, field: &'static str, raw: Option<&String>) -> EvalResult<i32> {
    let raw = raw.ok_or(EvalError::MissingField { object, field })?;
    // Some tools write fractional coordinates.
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i32)
        .ok_or_else(|| EvalError::InvalidNumber {
            object,
            field,
            value: raw.clone(),
        })
}

impl PendingObject {
    fn finish(self, index: usize) -> EvalResult<AnnotatedObject> {
        let mut c = [0i32; 4];
        for (slot, (field, raw)) in c.iter_mut().zip(CORNERS.iter().zip(&self.corners)) {
            *slot = parse_coord(index, field, raw.as_ref())?;
        }
        Ok(AnnotatedObject {
            name: self.name.unwrap_or_default(),
            bounds: Rect::from_inclusive_corners(c[0], c[1], c[2], c[3]),
        })
    }
}

/// Parse an annotation document.
///
/// # Errors
///
/// Returns [`EvalError::Xml`] for malformed XML, and
/// [`EvalError::MissingField`] or [`EvalError::InvalidNumber`] for an
/// object whose box cannot be read.
pub fn parse_annotation(xml: &str) -> EvalResult<Annotation> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut annotation = Annotation::default();
    let mut path: Vec<String> = Vec::new();
    let mut object: Option<PendingObject> = None;
    let mut size = (None, None);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if tag == "object" {
                    object = Some(PendingObject::default());
                }
                path.push(tag);
            }
            Event::End(_) => {
                if path.pop().as_deref() == Some("object") {
                    if let Some(pending) = object.take() {
                        let index = annotation.objects.len();
                        annotation.objects.push(pending.finish(index)?);
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?.into_owned();
                let tags: Vec<&str> = path.iter().map(String::as_str).collect();
                match tags.as_slice() {
                    [.., "object", "name"] => {
                        if let Some(o) = object.as_mut() {
                            o.name = Some(text);
                        }
                    }
                    [.., "object", "bndbox", field] => {
                        if let (Some(o), Some(i)) = (object.as_mut(), CORNERS.iter().position(|c| c == field)) {
                            o.corners[i] = Some(text);
                        }
                    }
                    ["annotation", "filename"] => annotation.filename = Some(text),
                    ["annotation", "size", "width"] => size.0 = text.trim().parse::<u32>().ok(),
                    ["annotation", "size", "height"] => size.1 = text.trim().parse::<u32>().ok(),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let (Some(w), Some(h)) = size {
        annotation.size = Some((w, h));
    }
    Ok(annotation)
}

/// Read and parse an annotation file.
pub fn read_annotation<P: AsRef<Path>>(path: P) -> EvalResult<Annotation> {
    let xml = std::fs::read_to_string(path)?;
    parse_annotation(&xml)
}
