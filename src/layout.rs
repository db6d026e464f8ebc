use std::{borrow::Cow, collections::HashMap};

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A rendered element whose geometry and computed style can be read.
///
/// Implementations backed by a live layout engine may have to run a layout pass to answer
/// `bounding_box`. Detached or not yet laid out elements report whatever the engine reports
/// (usually an empty rectangle).
pub trait LayoutQueryable {
    /// Content plus border, without the margins
    fn bounding_box(&self) -> Rect;

    /// The resolved value of a CSS property, e.g. `"10px"` or `"auto"`
    fn computed_style(&self, property: &str) -> Cow<'_, str>;
}

/// A frozen copy of an element's layout. Properties that were never set read as `""`, which is
/// what style engines return for unknown properties.
#[derive(Debug, Clone, Default)]
pub struct ElementSnapshot {
    bounding_box: Rect,
    computed_styles: HashMap<String, String>,
}

impl ElementSnapshot {
    pub fn new(bounding_box: Rect) -> Self {
        Self {
            bounding_box,
            computed_styles: HashMap::new(),
        }
    }

    pub fn with_style<P: Into<String>, V: Into<String>>(mut self, property: P, value: V) -> Self {
        self.computed_styles.insert(property.into(), value.into());
        self
    }
}

impl LayoutQueryable for ElementSnapshot {
    fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    fn computed_style(&self, property: &str) -> Cow<'_, str> {
        Cow::Borrowed(self.computed_styles.get(property).map_or("", String::as_str))
    }
}

fn skip_digits(bytes: &[u8], mut position: usize) -> usize {
    while bytes.get(position).map_or(false, u8::is_ascii_digit) {
        position += 1;
    }
    position
}

/// The longest prefix of `value` that reads as a decimal number: an optional sign, digits with
/// an optional fraction, and an optional exponent.
fn numeric_prefix(value: &str) -> &str {
    let bytes = value.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - integer_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_end = skip_digits(bytes, end + 1);
        mantissa_digits += fraction_end - (end + 1);
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_start = end + 1;
        if matches!(bytes.get(exponent_start), Some(b'+' | b'-')) {
            exponent_start += 1;
        }
        let exponent_end = skip_digits(bytes, exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }
    &value[..end]
}

/// Reads the number a computed style value starts with, ignoring the unit: `"10px"` is `10`,
/// `"auto"` and `""` are `None`.
pub fn parse_css_number(value: &str) -> Option<f64> {
    numeric_prefix(value.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn margin(element: &impl LayoutQueryable, property: &str) -> f64 {
    let value = element.computed_style(property);
    parse_css_number(&value).unwrap_or_else(|| {
        trace!("Treating {} {:?} as 0", property, value);
        0.0
    })
}

/// The vertical space the element takes up, margins included. Margins that aren't numbers count
/// as 0. Negative margins are added as they are, so only non-negative inputs guarantee a
/// non-negative result.
pub fn measure_full_height(element: &impl LayoutQueryable) -> f64 {
    let height = element.bounding_box().height;
    height + margin(element, "margin-top") + margin(element, "margin-bottom")
}
