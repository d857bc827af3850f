use crate::drawer_error::MyResult;
use eyre::WrapErr;
use widestring::U16CString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    Leading,
    Trailing,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphAlignment {
    Near,
    Far,
    #[default]
    Center,
}

/// Font and alignment used to lay out a control's label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFormat {
    pub font_family: String,
    /// Size in DIPs.
    pub font_size: f32,
    pub text_alignment: TextAlignment,
    pub paragraph_alignment: ParagraphAlignment,
}

impl TextFormat {
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            text_alignment: TextAlignment::default(),
            paragraph_alignment: ParagraphAlignment::default(),
        }
    }
}

impl TextFormat {
    /// Nul-terminated family name for DirectWrite.
    pub fn font_family_wide(&self) -> MyResult<U16CString> {
        let family = U16CString::from_str(&self.font_family)
            .wrap_err_with(|| format!("font family {:?} contains a nul character", self.font_family))?;
        Ok(family)
    }
}

impl Default for TextFormat {
    fn default() -> Self {
        Self::new("Calibri", 20.0)
    }
}

/// A label bound to a format and a layout box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub text: String,
    pub format: TextFormat,
    pub max_width: f32,
    pub max_height: f32,
}

impl TextLayout {
    pub fn new(text: impl Into<String>, format: TextFormat, max_width: f32, max_height: f32) -> Self {
        Self {
            text: text.into(),
            format,
            max_width,
            max_height,
        }
    }

    /// The label as UTF-16 code units, without a terminator.
    pub fn text_utf16(&self) -> Vec<u16> {
        self.text.encode_utf16().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_centered_calibri() {
        let format = TextFormat::default();
        assert_eq!(format.font_family, "Calibri");
        assert_eq!(format.font_size, 20.0);
        assert_eq!(format.text_alignment, TextAlignment::Center);
        assert_eq!(format.paragraph_alignment, ParagraphAlignment::Center);
    }

    #[test]
    fn font_family_is_nul_terminated_utf16() {
        let family = TextFormat::default().font_family_wide().unwrap();
        assert_eq!(family.as_slice(), "Calibri".encode_utf16().collect::<Vec<_>>());
        assert_eq!(family.as_slice_with_nul().last(), Some(&0));

        let broken = TextFormat::new("Cali\0bri", 20.0);
        assert!(broken.font_family_wide().is_err());
    }

    #[test]
    fn label_text_is_utf16_without_terminator() {
        let layout = TextLayout::new("Pausé", TextFormat::default(), 120.0, 36.0);
        assert_eq!(layout.text_utf16(), vec![0x50, 0x61, 0x75, 0x73, 0xE9]);
    }
}
