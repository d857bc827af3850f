use crate::drawer_error::MyResult;
use crate::window_class::WindowClass;
use crate::window_class_atom::ClassIdAtom;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::*;

/// Creates an overlapped window of the registered class `W`.
///
/// `behaviour` becomes the window's user data and must outlive the window.
pub fn create_window<W: WindowClass>(
    our_module: HMODULE,
    class: &ClassIdAtom,
    window_rect: RECT,
    title: PCWSTR,
    behaviour: *mut W,
) -> MyResult<HWND> {
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class,
            title,
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None, // no parent window
            None, // no menus
            Some(our_module.into()),
            Some(behaviour as _),
        )
    }?;
    Ok(hwnd)
}

/// Outer window rectangle whose client area is `width` by `height`.
pub fn window_rect_for_client_size(width: u32, height: u32) -> MyResult<RECT> {
    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
    };
    unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false)? };
    Ok(window_rect)
}
