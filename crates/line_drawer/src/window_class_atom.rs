use crate::drawer_error::MyResult;
use eyre::eyre;
use windows::Win32::Foundation::GetLastError;
use windows::Win32::UI::WindowsAndMessaging::RegisterClassExW;
use windows::Win32::UI::WindowsAndMessaging::WNDCLASSEXW;
use windows::core::PCWSTR;
use windows::core::Param;
use windows::core::ParamValue;

/// Equivalent to the MAKEINTATOM macro in C/C++.
///
/// https://learn.microsoft.com/en-us/windows/win32/api/winbase/nf-winbase-makeintatom
#[allow(non_snake_case)]
pub fn MAKEINTATOM(atom: u16) -> PCWSTR {
    // The low-order word is the atom, the high-order word is zero.
    PCWSTR(atom as *const u16)
}

pub struct ClassIdAtom(u16);

impl Param<PCWSTR> for &ClassIdAtom {
    unsafe fn param(self) -> ParamValue<PCWSTR> {
        ParamValue::Owned(MAKEINTATOM(self.0))
    }
}

pub fn register_window_class(class: &WNDCLASSEXW) -> MyResult<ClassIdAtom> {
    let atom = unsafe { RegisterClassExW(class) };
    if atom == 0 {
        let error = unsafe { GetLastError() };
        return Err(eyre!("RegisterClassExW failed: {:?}", error).into());
    }
    Ok(ClassIdAtom(atom))
}
