//! Control labels drawn with DirectWrite through a Direct2D context that
//! targets the swap chain's back buffer.

use crate::draw_list::Color;
use crate::draw_list::TextRun;
use crate::draw_list::colors;
use crate::drawer_error::MyResult;
use crate::gui::text_format::ParagraphAlignment;
use crate::gui::text_format::TextAlignment;
use crate::gui::text_format::TextFormat;
use tracing::debug;
use windows::Win32::Graphics::Direct2D::Common::*;
use windows::Win32::Graphics::Direct2D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::DirectWrite::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;
use windows::core::*;

pub struct TextRenderer {
    context: ID2D1DeviceContext,
    write_factory: IDWriteFactory,
    target: ID2D1Bitmap1,
    brush: ID2D1SolidColorBrush,
    /// DirectWrite formats created so far, one per distinct [`TextFormat`].
    formats: Vec<(TextFormat, IDWriteTextFormat)>,
}

impl TextRenderer {
    /// `device` must have been created with BGRA support and `back_buffer`
    /// must be a B8G8R8A8 swap chain buffer.
    pub fn new(device: &ID3D11Device, back_buffer: &ID3D11Texture2D) -> MyResult<Self> {
        let factory: ID2D1Factory1 =
            unsafe { D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)? };
        let dxgi_device: IDXGIDevice = device.cast()?;
        let d2d_device = unsafe { factory.CreateDevice(&dxgi_device)? };
        let context = unsafe { d2d_device.CreateDeviceContext(D2D1_DEVICE_CONTEXT_OPTIONS_NONE)? };

        let surface: IDXGISurface = back_buffer.cast()?;
        let target = create_target_bitmap(&context, &surface)?;
        let brush = unsafe { context.CreateSolidColorBrush(&color_f(colors::WHITE), None)? };
        let write_factory: IDWriteFactory = unsafe { DWriteCreateFactory(DWRITE_FACTORY_TYPE_SHARED)? };

        debug!("Created Direct2D context on the back buffer");
        Ok(Self {
            context,
            write_factory,
            target,
            brush,
            formats: Vec::new(),
        })
    }

    /// Draws every run over whatever the back buffer already holds.
    pub fn draw(&mut self, runs: &[TextRun]) -> MyResult<()> {
        if runs.is_empty() {
            return Ok(());
        }

        unsafe {
            self.context.SetTarget(&self.target);
            self.context.BeginDraw();
        }
        let drawn = runs.iter().try_for_each(|run| self.draw_run(run));
        // EndDraw has to pair with BeginDraw even when a run failed.
        unsafe { self.context.EndDraw(None, None)? };
        drawn
    }

    fn draw_run(&mut self, run: &TextRun) -> MyResult<()> {
        let format = self.text_format(&run.layout.format)?.clone();
        let text = run.layout.text_utf16();
        let rect = run.layout_rect();
        let layout_rect = D2D_RECT_F {
            left: rect.min.x,
            top: rect.min.y,
            right: rect.max.x,
            bottom: rect.max.y,
        };

        unsafe {
            self.brush.SetColor(&color_f(run.color));
            self.context.DrawText(
                &text,
                &format,
                &layout_rect,
                &self.brush,
                D2D1_DRAW_TEXT_OPTIONS_NONE,
                DWRITE_MEASURING_MODE_NATURAL,
            );
        }
        Ok(())
    }

    fn text_format(&mut self, format: &TextFormat) -> MyResult<&IDWriteTextFormat> {
        let index = match self.formats.iter().position(|(known, _)| known == format) {
            Some(index) => index,
            None => {
                let created = create_text_format(&self.write_factory, format)?;
                debug!(
                    family = %format.font_family,
                    size = format.font_size,
                    "Created text format"
                );
                self.formats.push((format.clone(), created));
                self.formats.len() - 1
            }
        };
        Ok(&self.formats[index].1)
    }
}

fn create_text_format(factory: &IDWriteFactory, format: &TextFormat) -> MyResult<IDWriteTextFormat> {
    let family = format.font_family_wide()?;
    unsafe {
        let text_format = factory.CreateTextFormat(
            PCWSTR(family.as_ptr()),
            None::<&IDWriteFontCollection>,
            DWRITE_FONT_WEIGHT_NORMAL,
            DWRITE_FONT_STYLE_NORMAL,
            DWRITE_FONT_STRETCH_NORMAL,
            format.font_size,
            w!("en-US"),
        )?;
        text_format.SetTextAlignment(text_alignment(format.text_alignment))?;
        text_format.SetParagraphAlignment(paragraph_alignment(format.paragraph_alignment))?;
        Ok(text_format)
    }
}

fn create_target_bitmap(context: &ID2D1DeviceContext, surface: &IDXGISurface) -> MyResult<ID2D1Bitmap1> {
    let bitmap_props = D2D1_BITMAP_PROPERTIES1 {
        pixelFormat: D2D1_PIXEL_FORMAT {
            format: DXGI_FORMAT_B8G8R8A8_UNORM,
            alphaMode: D2D1_ALPHA_MODE_IGNORE,
        },
        dpiX: 96.0,
        dpiY: 96.0,
        bitmapOptions: D2D1_BITMAP_OPTIONS_TARGET | D2D1_BITMAP_OPTIONS_CANNOT_DRAW,
        colorContext: std::mem::ManuallyDrop::new(None),
    };
    let bitmap = unsafe { context.CreateBitmapFromDxgiSurface(surface, Some(&bitmap_props))? };
    Ok(bitmap)
}

fn text_alignment(alignment: TextAlignment) -> DWRITE_TEXT_ALIGNMENT {
    match alignment {
        TextAlignment::Leading => DWRITE_TEXT_ALIGNMENT_LEADING,
        TextAlignment::Trailing => DWRITE_TEXT_ALIGNMENT_TRAILING,
        TextAlignment::Center => DWRITE_TEXT_ALIGNMENT_CENTER,
    }
}

fn paragraph_alignment(alignment: ParagraphAlignment) -> DWRITE_PARAGRAPH_ALIGNMENT {
    match alignment {
        ParagraphAlignment::Near => DWRITE_PARAGRAPH_ALIGNMENT_NEAR,
        ParagraphAlignment::Far => DWRITE_PARAGRAPH_ALIGNMENT_FAR,
        ParagraphAlignment::Center => DWRITE_PARAGRAPH_ALIGNMENT_CENTER,
    }
}

fn color_f(color: Color) -> D2D1_COLOR_F {
    D2D1_COLOR_F {
        r: color.x,
        g: color.y,
        b: color.z,
        a: color.w,
    }
}
