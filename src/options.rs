//! Conversion options – the typed record of every rendering setting for one
//! HTML → PDF conversion, tagged with the renderer flag each field maps to.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::flags::{FlagSet, FlagValue, OptionFlag};
use crate::margins::Margins;

/// MIME type of the document the renderer produces.
pub const CONTENT_TYPE: &str = "application/pdf";

/// Named paper sizes accepted by the renderer's `-s` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    A9,
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    C5E,
    Comm10E,
    DLE,
    Executive,
    Folio,
    Ledger,
    Legal,
    Letter,
    Tabloid,
}

impl PageSize {
    /// Renderer spelling of the size.
    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::A0 => "A0",
            PageSize::A1 => "A1",
            PageSize::A2 => "A2",
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::A6 => "A6",
            PageSize::A7 => "A7",
            PageSize::A8 => "A8",
            PageSize::A9 => "A9",
            PageSize::B0 => "B0",
            PageSize::B1 => "B1",
            PageSize::B2 => "B2",
            PageSize::B3 => "B3",
            PageSize::B4 => "B4",
            PageSize::B5 => "B5",
            PageSize::B6 => "B6",
            PageSize::B7 => "B7",
            PageSize::B8 => "B8",
            PageSize::B9 => "B9",
            PageSize::B10 => "B10",
            PageSize::C5E => "C5E",
            PageSize::Comm10E => "Comm10E",
            PageSize::DLE => "DLE",
            PageSize::Executive => "Executive",
            PageSize::Folio => "Folio",
            PageSize::Ledger => "Ledger",
            PageSize::Legal => "Legal",
            PageSize::Letter => "Letter",
            PageSize::Tabloid => "Tabloid",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page orientation for the generated PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All rendering settings for one conversion request.
///
/// Absent fields write nothing. Field order in [`FlagSet::FLAGS`] fixes the
/// order of the serialized command line; [`margins`](Self::margins) is not
/// part of that table and is always written first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Named paper size (`-s`).
    pub page_size: Option<PageSize>,
    /// Page width in mm (`--page-width`). Together with
    /// [`page_height`](Self::page_height) the renderer prefers it over
    /// [`page_size`](Self::page_size); both are still written.
    pub page_width: Option<f64>,
    /// Page height in mm (`--page-height`).
    pub page_height: Option<f64>,
    /// Page orientation (`-O`).
    pub page_orientation: Option<Orientation>,
    pub margins: Margins,
    /// Render in lower quality (`-l`).
    pub is_low_quality: bool,
    /// Render in grayscale (`-g`).
    pub is_grayscale: bool,
    /// Number of copies printed into the PDF (`--copies`).
    pub copies: Option<i32>,
    /// Path to a header HTML file (`--header-html`).
    pub header_html: Option<String>,
    /// Path to a footer HTML file (`--footer-html`).
    pub footer_html: Option<String>,
    /// Left-aligned footer text (`--footer-left`).
    pub footer_left: Option<String>,
    /// Centered footer text (`--footer-center`).
    pub footer_center: Option<String>,
    /// Right-aligned footer text (`--footer-right`).
    pub footer_right: Option<String>,
    /// Footer font name, renderer default Arial (`--footer-font-name`).
    pub footer_font_name: Option<String>,
    /// Footer font size, renderer default 12 (`--footer-font-size`).
    pub footer_font_size: Option<i32>,
    /// Gap between header and content in mm (`--header-spacing`).
    pub header_spacing: Option<i32>,
    /// Gap between footer and content in mm (`--footer-spacing`).
    pub footer_spacing: Option<i32>,
    /// Extra HTTP headers sent with every page request (`--custom-header`).
    pub custom_headers: IndexMap<String, String>,
    /// Cookies sent with every page request (`--cookie`).
    pub cookies: IndexMap<String, String>,
    /// Header/footer text substitutions (`--replace`).
    pub replacements: IndexMap<String, String>,
}

impl FlagSet for ConvertOptions {
    const FLAGS: &'static [OptionFlag<Self>] = &[
        OptionFlag { flag: "-s", value: |o| FlagValue::Keyword(o.page_size.map(PageSize::as_str)) },
        OptionFlag { flag: "--page-width", value: |o| FlagValue::real(o.page_width) },
        OptionFlag { flag: "--page-height", value: |o| FlagValue::real(o.page_height) },
        OptionFlag {
            flag: "-O",
            value: |o| FlagValue::Keyword(o.page_orientation.map(Orientation::as_str)),
        },
        OptionFlag { flag: "-l", value: |o| FlagValue::Switch(o.is_low_quality) },
        OptionFlag { flag: "-g", value: |o| FlagValue::Switch(o.is_grayscale) },
        OptionFlag { flag: "--copies", value: |o| FlagValue::int(o.copies) },
        OptionFlag { flag: "--header-html", value: |o| FlagValue::text(&o.header_html) },
        OptionFlag { flag: "--footer-html", value: |o| FlagValue::text(&o.footer_html) },
        OptionFlag { flag: "--footer-left", value: |o| FlagValue::text(&o.footer_left) },
        OptionFlag { flag: "--footer-center", value: |o| FlagValue::text(&o.footer_center) },
        OptionFlag { flag: "--footer-right", value: |o| FlagValue::text(&o.footer_right) },
        OptionFlag { flag: "--footer-font-name", value: |o| FlagValue::text(&o.footer_font_name) },
        OptionFlag { flag: "--footer-font-size", value: |o| FlagValue::int(o.footer_font_size) },
        OptionFlag { flag: "--header-spacing", value: |o| FlagValue::int(o.header_spacing) },
        OptionFlag { flag: "--footer-spacing", value: |o| FlagValue::int(o.footer_spacing) },
        OptionFlag { flag: "--custom-header", value: |o| FlagValue::Map(&o.custom_headers) },
        OptionFlag { flag: "--cookie", value: |o| FlagValue::Map(&o.cookies) },
        OptionFlag { flag: "--replace", value: |o| FlagValue::Map(&o.replacements) },
    ];
}

impl ConvertOptions {
    /// Options with every field absent and empty margins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh options carrying every setting of `base` except its margins.
    pub fn from_base(base: &ConvertOptions) -> Self {
        let mut options = Self::new();
        options.copy_from(base);
        options
    }

    /// Overwrite every field with the value from `source`.
    ///
    /// Margins are not inherited: they are reset to empty and must be set
    /// again after the copy.
    pub fn copy_from(&mut self, source: &ConvertOptions) {
        self.margins = Margins::new();

        self.page_size = source.page_size;
        self.page_width = source.page_width;
        self.page_height = source.page_height;
        self.page_orientation = source.page_orientation;
        self.is_low_quality = source.is_low_quality;
        self.is_grayscale = source.is_grayscale;
        self.copies = source.copies;
        self.header_html = source.header_html.clone();
        self.header_spacing = source.header_spacing;
        self.footer_html = source.footer_html.clone();
        self.footer_left = source.footer_left.clone();
        self.footer_center = source.footer_center.clone();
        self.footer_right = source.footer_right.clone();
        self.footer_font_name = source.footer_font_name.clone();
        self.footer_font_size = source.footer_font_size;
        self.footer_spacing = source.footer_spacing;
        self.custom_headers = source.custom_headers.clone();
        self.cookies = source.cookies.clone();
        self.replacements = source.replacements.clone();
    }

    /// MIME type of the rendered output.
    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Apply the top-level keys of a JSON object on top of these options.
    ///
    /// Keys missing from `json` keep their current value; a key that is
    /// present replaces the whole field (so `"margins"` replaces all four
    /// sides at once).
    pub fn apply_json_overrides(&mut self, json: &str) -> Result<(), OptionsError> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut current = serde_json::to_value(&*self)?;
        if let serde_json::Value::Object(fields) = &mut current {
            for (key, value) in overrides {
                fields.insert(key, value);
            }
        }
        *self = serde_json::from_value(current)?;
        Ok(())
    }

    /// Report legal but suspicious settings. Serialization is unaffected;
    /// every finding is also logged at `warn` level.
    pub fn validate(&self) -> Vec<OptionWarning> {
        let mut warnings = Vec::new();

        match (self.page_width, self.page_height) {
            (Some(_), None) => warnings.push(OptionWarning::MissingPageDimension("--page-height")),
            (None, Some(_)) => warnings.push(OptionWarning::MissingPageDimension("--page-width")),
            (Some(_), Some(_)) => {
                if let Some(size) = self.page_size {
                    warnings.push(OptionWarning::PageSizeOverridden(size));
                }
            }
            (None, None) => {}
        }

        for (flag, value) in [("--page-width", self.page_width), ("--page-height", self.page_height)] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    warnings.push(OptionWarning::InvalidPageDimension { flag, value: v });
                }
            }
        }

        if let Some(copies) = self.copies {
            if copies < 1 {
                warnings.push(OptionWarning::NonPositiveCopies(copies));
            }
        }

        let counts = [
            ("--footer-font-size", self.footer_font_size),
            ("--header-spacing", self.header_spacing),
            ("--footer-spacing", self.footer_spacing),
            ("-T", self.margins.top),
            ("-B", self.margins.bottom),
            ("-L", self.margins.left),
            ("-R", self.margins.right),
        ];
        for (flag, value) in counts {
            if let Some(v) = value {
                if v < 0 {
                    warnings.push(OptionWarning::Negative { flag, value: v });
                }
            }
        }

        for w in &warnings {
            warn!("{w}");
        }
        warnings
    }
}

/// A setting the renderer will accept but probably not honour as intended.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionWarning {
    /// Only one of width/height was set; the named flag is missing.
    MissingPageDimension(&'static str),
    /// Width and height are both set and take priority over this size.
    PageSizeOverridden(PageSize),
    InvalidPageDimension { flag: &'static str, value: f64 },
    NonPositiveCopies(i32),
    Negative { flag: &'static str, value: i32 },
}

impl fmt::Display for OptionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionWarning::MissingPageDimension(flag) => {
                write!(f, "page width and height must be set together; {flag} is missing")
            }
            OptionWarning::PageSizeOverridden(size) => {
                write!(f, "page size {size} is overridden by the explicit page width and height")
            }
            OptionWarning::InvalidPageDimension { flag, value } => {
                write!(f, "{flag} must be a positive number of millimetres, got {value}")
            }
            OptionWarning::NonPositiveCopies(n) => write!(f, "--copies should be at least 1, got {n}"),
            OptionWarning::Negative { flag, value } => {
                write!(f, "{flag} should not be negative, got {value}")
            }
        }
    }
}
