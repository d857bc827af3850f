use crate::camera::Camera;
use crate::camera::FrameTransform;
use crate::display_config::DisplayWindowConfiguration;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameClock;
use crate::frame_clock::FrameTime;
use crate::frame_targets::CLEAR_COLOR;
use crate::frame_targets::CLEAR_DEPTH;
use crate::frame_targets::CLEAR_STENCIL;
use crate::frame_targets::ViewportExtent;
use crate::frame_targets::sync_interval;
use eyre::eyre;
use tracing::info;
use tracing::warn;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

/// Owns the Direct3D11 device, swap chain, back buffer and depth buffer of a
/// window, and runs the per-frame clear and present.
///
/// All resources are valid from [`initialize`](Self::initialize) until the
/// base is dropped.
pub struct D3D11Base {
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    swap_chain: IDXGISwapChain,
    back_buffer: ID3D11Texture2D,
    back_buffer_view: ID3D11RenderTargetView,
    /// The depth texture lives as long as this view.
    depth_view: ID3D11DepthStencilView,
    config: DisplayWindowConfiguration,
    camera: Camera,
    clock: FrameClock,
}

impl D3D11Base {
    pub fn initialize(hwnd: HWND, config: &DisplayWindowConfiguration) -> MyResult<Self> {
        let swap_chain_desc = DXGI_SWAP_CHAIN_DESC {
            BufferDesc: DXGI_MODE_DESC {
                Width: config.width,
                Height: config.height,
                RefreshRate: DXGI_RATIONAL {
                    Numerator: 60,
                    Denominator: 1,
                },
                // Direct2D draws labels into the same buffer and wants BGRA.
                Format: DXGI_FORMAT_B8G8R8A8_UNORM,
                ..Default::default()
            },
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: 1,
            OutputWindow: hwnd,
            Windowed: TRUE,
            SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
            ..Default::default()
        };

        let driver_type = if config.use_warp_device {
            info!("Using WARP driver.");
            D3D_DRIVER_TYPE_WARP
        } else {
            D3D_DRIVER_TYPE_HARDWARE
        };
        let (device, context, swap_chain) = create_device_and_swap_chain(driver_type, &swap_chain_desc)?;

        // Window events are handled by the message loop, not by DXGI.
        let factory: IDXGIFactory = unsafe { swap_chain.GetParent()? };
        unsafe {
            factory.MakeWindowAssociation(
                hwnd,
                DXGI_MWA_NO_WINDOW_CHANGES | DXGI_MWA_NO_ALT_ENTER | DXGI_MWA_NO_PRINT_SCREEN,
            )?
        };

        let back_buffer: ID3D11Texture2D = unsafe { swap_chain.GetBuffer(0)? };
        let mut back_buffer_view = None;
        unsafe { device.CreateRenderTargetView(&back_buffer, None, Some(&mut back_buffer_view))? };
        let back_buffer_view =
            back_buffer_view.ok_or_else(|| eyre!("CreateRenderTargetView returned no view"))?;

        let mut client_rect = RECT::default();
        unsafe { GetClientRect(hwnd, &mut client_rect)? };
        let depth_width = (client_rect.right - client_rect.left).max(1) as u32;
        let depth_height = (client_rect.bottom - client_rect.top).max(1) as u32;
        let depth_view = create_depth_view(&device, depth_width, depth_height)?;

        info!(
            width = config.width,
            height = config.height,
            depth_width,
            depth_height,
            "Created swap chain and depth buffer"
        );

        Ok(Self {
            device,
            context,
            swap_chain,
            back_buffer,
            back_buffer_view,
            depth_view,
            config: config.clone(),
            camera: Camera::default().with_perspective(config.aspect_ratio()),
            clock: FrameClock::start(),
        })
    }

    pub fn device(&self) -> &ID3D11Device {
        &self.device
    }

    pub fn context(&self) -> &ID3D11DeviceContext {
        &self.context
    }

    /// The backbuffer used by the swap chain.
    pub fn back_buffer(&self) -> &ID3D11Texture2D {
        &self.back_buffer
    }

    pub fn config(&self) -> &DisplayWindowConfiguration {
        &self.config
    }

    pub fn tick(&mut self) -> FrameTime {
        self.clock.tick()
    }

    /// Clears the views, binds them with a full-window viewport, and returns
    /// the spinning world-view transform for `time`.
    pub fn begin_draw(&self, time: &FrameTime) -> FrameTransform {
        let extent = ViewportExtent::for_config(&self.config);
        let viewport = D3D11_VIEWPORT {
            TopLeftX: extent.top_left_x,
            TopLeftY: extent.top_left_y,
            Width: extent.width,
            Height: extent.height,
            MinDepth: extent.min_depth,
            MaxDepth: extent.max_depth,
        };

        unsafe {
            self.context.ClearDepthStencilView(
                &self.depth_view,
                (D3D11_CLEAR_DEPTH.0 | D3D11_CLEAR_STENCIL.0) as u32,
                CLEAR_DEPTH,
                CLEAR_STENCIL,
            );
            self.context
                .ClearRenderTargetView(&self.back_buffer_view, &CLEAR_COLOR);
            self.context.RSSetViewports(Some(&[viewport]));
            self.context.OMSetRenderTargets(
                Some(&[Some(self.back_buffer_view.clone())]),
                &self.depth_view,
            );
        }

        self.camera.frame_transform(time.total_seconds())
    }

    pub fn end_draw(&self) -> MyResult<()> {
        let sync_interval = sync_interval(&self.config);
        unsafe { self.swap_chain.Present(sync_interval, DXGI_PRESENT(0)) }.ok()?;
        Ok(())
    }
}

impl Drop for D3D11Base {
    fn drop(&mut self) {
        // COM references are released as the fields drop.
        unsafe {
            self.context.ClearState();
            self.context.Flush();
        }
        info!("Released Direct3D11 resources");
    }
}

fn create_device_and_swap_chain(
    driver_type: D3D_DRIVER_TYPE,
    swap_chain_desc: &DXGI_SWAP_CHAIN_DESC,
) -> MyResult<(ID3D11Device, ID3D11DeviceContext, IDXGISwapChain)> {
    // Direct2D can only target devices created with BGRA support.
    let flags = D3D11_CREATE_DEVICE_BGRA_SUPPORT;
    if cfg!(debug_assertions) {
        match try_create_device_and_swap_chain(driver_type, flags | D3D11_CREATE_DEVICE_DEBUG, swap_chain_desc) {
            Ok(created) => {
                info!("D3D11 Debug Layer Enabled");
                return Ok(created);
            }
            Err(e) => warn!("D3D11 Debug Layer unavailable: {}", e),
        }
    }
    try_create_device_and_swap_chain(driver_type, flags, swap_chain_desc)
}

fn try_create_device_and_swap_chain(
    driver_type: D3D_DRIVER_TYPE,
    flags: D3D11_CREATE_DEVICE_FLAG,
    swap_chain_desc: &DXGI_SWAP_CHAIN_DESC,
) -> MyResult<(ID3D11Device, ID3D11DeviceContext, IDXGISwapChain)> {
    let mut swap_chain = None;
    let mut device = None;
    let mut context = None;
    let mut feature_level = D3D_FEATURE_LEVEL::default();
    unsafe {
        D3D11CreateDeviceAndSwapChain(
            None::<&IDXGIAdapter>,
            driver_type,
            HMODULE::default(),
            flags,
            None, // default feature levels
            D3D11_SDK_VERSION,
            Some(swap_chain_desc),
            Some(&mut swap_chain),
            Some(&mut device),
            Some(&mut feature_level),
            Some(&mut context),
        )?
    };
    info!("Created D3D11 device with feature level {:#x}", feature_level.0);

    let device = device.ok_or_else(|| eyre!("D3D11CreateDeviceAndSwapChain returned no device"))?;
    let context = context.ok_or_else(|| eyre!("D3D11CreateDeviceAndSwapChain returned no context"))?;
    let swap_chain =
        swap_chain.ok_or_else(|| eyre!("D3D11CreateDeviceAndSwapChain returned no swap chain"))?;
    Ok((device, context, swap_chain))
}

fn create_depth_view(device: &ID3D11Device, width: u32, height: u32) -> MyResult<ID3D11DepthStencilView> {
    let desc = D3D11_TEXTURE2D_DESC {
        Width: width,
        Height: height,
        MipLevels: 1,
        ArraySize: 1,
        Format: DXGI_FORMAT_D32_FLOAT_S8X24_UINT,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Usage: D3D11_USAGE_DEFAULT,
        BindFlags: D3D11_BIND_DEPTH_STENCIL.0 as u32,
        CPUAccessFlags: 0,
        MiscFlags: 0,
    };

    let mut depth_buffer = None;
    unsafe { device.CreateTexture2D(&desc, None, Some(&mut depth_buffer))? };
    let depth_buffer = depth_buffer.ok_or_else(|| eyre!("CreateTexture2D returned no depth buffer"))?;

    let mut depth_view = None;
    unsafe { device.CreateDepthStencilView(&depth_buffer, None, Some(&mut depth_view))? };
    let depth_view = depth_view.ok_or_else(|| eyre!("CreateDepthStencilView returned no view"))?;

    Ok(depth_view)
}
