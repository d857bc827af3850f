use crate::create_window::create_window;
use crate::create_window::window_rect_for_client_size;
use crate::d3d11_base::D3D11Base;
use crate::display_config::DisplayWindowConfiguration;
use crate::draw_behaviour::DrawBehaviour;
use crate::draw_list::DrawList;
use crate::drawer_error::MyResult;
use crate::line_renderer::LineRenderer;
use crate::text_renderer::TextRenderer;
use crate::window_class::create_window_class_struct;
use crate::window_class_atom::register_window_class;
use eyre::WrapErr;
use tracing::error;
use tracing::info;
use widestring::U16CString;
use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

/// Opens a window for `behaviour` and drives it until the window closes.
pub fn run<B: DrawBehaviour + 'static>(
    config: DisplayWindowConfiguration,
    behaviour: B,
) -> MyResult<()> {
    let our_module = get_handle_to_file_used_to_create_the_calling_process()?;

    let window_class = create_window_class_struct::<B>(our_module)?;
    let class_atom = register_window_class(&window_class)?;

    let window_rect = window_rect_for_client_size(config.width, config.height)?;
    let mut title = config.title.clone();
    if config.use_warp_device {
        title.push_str(" (WARP)");
    }
    let title = U16CString::from_str(&title).wrap_err("window title contains a nul character")?;

    // Shared with the window procedure through GWLP_USERDATA.
    let behaviour = Box::into_raw(Box::new(behaviour));
    let result = create_window::<B>(
        our_module,
        &class_atom,
        window_rect,
        PCWSTR(title.as_ptr()),
        behaviour,
    )
    .and_then(|hwnd| {
        let result = run_message_loop(hwnd, &config, behaviour);
        if result.is_err() {
            unsafe { _ = DestroyWindow(hwnd) };
        }
        result
    });

    // The window is gone (WM_DESTROY cleared its user data), so nothing else
    // points at the behaviour.
    drop(unsafe { Box::from_raw(behaviour) });
    result
}

fn run_message_loop<B: DrawBehaviour>(
    hwnd: HWND,
    config: &DisplayWindowConfiguration,
    behaviour: *mut B,
) -> MyResult<()> {
    let mut base = D3D11Base::initialize(hwnd, config)?;
    let mut renderers = Renderers {
        lines: LineRenderer::new(base.device())?,
        text: TextRenderer::new(base.device(), base.back_buffer())?,
    };
    let mut draw_list = DrawList::new();

    unsafe { _ = ShowWindow(hwnd, SW_SHOW) };
    info!("Showing {:?}", config.title);

    let mut done = false;
    while !done {
        let mut message = MSG::default();

        if unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.into() {
            unsafe {
                _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }

            if message.message == WM_QUIT {
                done = true;
            }
        } else {
            let behaviour = unsafe { &mut *behaviour };
            // Render when idle; a failed frame is logged and the next one retries.
            if let Err(e) = render_frame(&mut base, &mut renderers, &mut draw_list, behaviour) {
                error!("Render error: {:?}", e);
            }
            if behaviour.should_close() {
                info!("Close requested");
                unsafe { DestroyWindow(hwnd)? };
            }
        }
    }
    Ok(())
}

struct Renderers {
    lines: LineRenderer,
    text: TextRenderer,
}

fn render_frame<B: DrawBehaviour>(
    base: &mut D3D11Base,
    renderers: &mut Renderers,
    draw_list: &mut DrawList,
    behaviour: &mut B,
) -> MyResult<()> {
    let time = base.tick();
    behaviour.on_update(&time);

    let mut transform = base.begin_draw(&time);
    draw_list.clear();
    behaviour.on_render(draw_list, &mut transform)?;

    let screen_size = (base.config().width, base.config().height);
    renderers
        .lines
        .draw(base.device(), base.context(), draw_list, &transform, screen_size)?;
    // Labels go over the screen batch they belong to.
    renderers.text.draw(&draw_list.text)?;
    base.end_draw()
}

fn get_handle_to_file_used_to_create_the_calling_process() -> MyResult<HMODULE> {
    let mut out = Default::default();
    unsafe { GetModuleHandleExW(Default::default(), None, &mut out)? };
    Ok(out)
}
