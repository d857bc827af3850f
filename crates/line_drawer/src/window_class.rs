use crate::draw_behaviour::DrawBehaviour;
use crate::drawer_error::MyResult;
use crate::drawer_error::panic_message;
use bevy_math::Vec2;
use tracing::error;
use windows::Win32::Foundation::*;
use windows::Win32::UI::Input::KeyboardAndMouse::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::*;

pub trait WindowClass {
    /// The name of the window class.
    const ID: PCWSTR;

    /// Returns `true` when the message was handled and `DefWindowProc`
    /// should be skipped.
    fn handle(&mut self, window: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool;
}

impl<B: DrawBehaviour> WindowClass for B {
    const ID: PCWSTR = w!("LineDrawerWindowClass");

    fn handle(&mut self, window: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool {
        match message {
            WM_KEYDOWN => {
                self.on_key_down(wparam.0 as u8);
                true
            }
            WM_KEYUP => {
                self.on_key_up(wparam.0 as u8);
                true
            }
            WM_MOUSEMOVE => {
                track_mouse_leave(window);
                self.on_mouse_move(client_point(lparam));
                true
            }
            WM_LBUTTONDOWN => {
                unsafe { SetCapture(window) };
                self.on_mouse_down(client_point(lparam));
                true
            }
            WM_LBUTTONUP => {
                unsafe { _ = ReleaseCapture() };
                self.on_mouse_up(client_point(lparam));
                true
            }
            WM_MOUSELEAVE => {
                self.on_mouse_leave();
                true
            }
            // Painting happens in the idle branch of the message loop;
            // DefWindowProc still has to validate the region.
            WM_PAINT => false,
            _ => false,
        }
    }
}

/// Signed client coordinates packed into a mouse message's `LPARAM`.
fn client_point(lparam: LPARAM) -> Vec2 {
    let x = (lparam.0 & 0xFFFF) as u16 as i16;
    let y = ((lparam.0 >> 16) & 0xFFFF) as u16 as i16;
    Vec2::new(x as f32, y as f32)
}

fn track_mouse_leave(window: HWND) {
    let mut event = TRACKMOUSEEVENT {
        cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
        dwFlags: TME_LEAVE,
        hwndTrack: window,
        dwHoverTime: 0,
    };
    unsafe { _ = TrackMouseEvent(&mut event) };
}

pub fn create_window_class_struct<W: WindowClass>(instance: HMODULE) -> MyResult<WNDCLASSEXW> {
    // WNDCLASSEXW - https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-wndclassexw
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc::<W>),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
        lpszClassName: W::ID,
        ..Default::default()
    };
    Ok(wc)
}

extern "system" fn wndproc<W: WindowClass>(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_CREATE {
        unsafe {
            let create_struct: &CREATESTRUCTW = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
        }
        return LRESULT(0);
    }

    let user_data = unsafe { GetWindowLongPtrW(window, GWLP_USERDATA) };
    let Some(mut behaviour) = std::ptr::NonNull::<W>::new(user_data as *mut W) else {
        // We can get messages before WM_CREATE or after WM_DESTROY.
        return unsafe { DefWindowProcW(window, message, wparam, lparam) };
    };

    let handled = match message {
        WM_DESTROY => {
            unsafe {
                // The behaviour is freed once the message loop ends.
                SetWindowLongPtrW(window, GWLP_USERDATA, 0);
                PostQuitMessage(0);
            }
            true
        }
        _ => std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe {
            behaviour.as_mut().handle(window, message, wparam, lparam)
        }))
        .unwrap_or_else(|payload| {
            error!(
                "Window handler panicked on message {:#x}: {}",
                message,
                panic_message(payload.as_ref())
            );
            false
        }),
    };

    if handled {
        LRESULT(0)
    } else {
        unsafe { DefWindowProcW(window, message, wparam, lparam) }
    }
}
