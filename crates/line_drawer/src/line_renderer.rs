use crate::camera::FrameTransform;
use crate::draw_list::Batch;
use crate::draw_list::DrawList;
use crate::draw_list::Vertex;
use crate::drawer_error::MyResult;
use bevy_math::Mat4;
use eyre::eyre;
use tracing::debug;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::core::*;

const SHADER_SOURCE: &str = r#"
cbuffer Transform : register(b0)
{
    float4x4 WorldView;
};

struct VSInput
{
    float3 position : POSITION;
    float4 color : COLOR;
};

struct PSInput
{
    float4 position : SV_POSITION;
    float4 color : COLOR;
};

PSInput VSMain(VSInput input)
{
    PSInput result;
    result.position = mul(float4(input.position, 1.0), WorldView);
    result.color = input.color;
    return result;
}

float4 PSMain(PSInput input) : SV_TARGET
{
    return input.color;
}
"#;

const INITIAL_VERTEX_CAPACITY: usize = 1024;

/// Uploads a [`DrawList`] and draws it with a single position/color pipeline.
///
/// The world batch is depth tested and goes through the frame transform. The
/// screen batch is drawn on top, mapped from window pixels to clip space.
/// Text runs are left to [`TextRenderer`](crate::text_renderer::TextRenderer).
pub struct LineRenderer {
    vertex_shader: ID3D11VertexShader,
    pixel_shader: ID3D11PixelShader,
    input_layout: ID3D11InputLayout,
    constant_buffer: ID3D11Buffer,
    vertex_buffer: ID3D11Buffer,
    vertex_capacity: usize,
    world_depth_state: ID3D11DepthStencilState,
    screen_depth_state: ID3D11DepthStencilState,
    rasterizer_state: ID3D11RasterizerState,
}

impl LineRenderer {
    pub fn new(device: &ID3D11Device) -> MyResult<Self> {
        let vertex_shader_blob = compile_shader(s!("VSMain"), s!("vs_5_0"))?;
        let pixel_shader_blob = compile_shader(s!("PSMain"), s!("ps_5_0"))?;
        let vertex_bytecode = unsafe { blob_bytes(&vertex_shader_blob) };
        let pixel_bytecode = unsafe { blob_bytes(&pixel_shader_blob) };

        let mut vertex_shader = None;
        unsafe { device.CreateVertexShader(vertex_bytecode, None, Some(&mut vertex_shader))? };
        let mut pixel_shader = None;
        unsafe { device.CreatePixelShader(pixel_bytecode, None, Some(&mut pixel_shader))? };

        let input_element_descs = [
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("POSITION"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: 0,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("COLOR"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32A32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: 12, // after position (3 * 4 bytes)
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
        ];
        let mut input_layout = None;
        unsafe {
            device.CreateInputLayout(&input_element_descs, vertex_bytecode, Some(&mut input_layout))?
        };

        let constant_buffer_desc = D3D11_BUFFER_DESC {
            ByteWidth: std::mem::size_of::<Mat4>() as u32,
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: D3D11_BIND_CONSTANT_BUFFER.0 as u32,
            CPUAccessFlags: 0,
            MiscFlags: 0,
            StructureByteStride: 0,
        };
        let mut constant_buffer = None;
        unsafe { device.CreateBuffer(&constant_buffer_desc, None, Some(&mut constant_buffer))? };

        let world_depth_state = create_depth_state(device, true)?;
        let screen_depth_state = create_depth_state(device, false)?;

        let rasterizer_desc = D3D11_RASTERIZER_DESC {
            FillMode: D3D11_FILL_SOLID,
            CullMode: D3D11_CULL_NONE,
            DepthClipEnable: TRUE,
            ..Default::default()
        };
        let mut rasterizer_state = None;
        unsafe { device.CreateRasterizerState(&rasterizer_desc, Some(&mut rasterizer_state))? };

        Ok(Self {
            vertex_shader: vertex_shader.ok_or_else(|| eyre!("no vertex shader"))?,
            pixel_shader: pixel_shader.ok_or_else(|| eyre!("no pixel shader"))?,
            input_layout: input_layout.ok_or_else(|| eyre!("no input layout"))?,
            constant_buffer: constant_buffer.ok_or_else(|| eyre!("no constant buffer"))?,
            vertex_buffer: create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY)?,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            world_depth_state,
            screen_depth_state,
            rasterizer_state: rasterizer_state.ok_or_else(|| eyre!("no rasterizer state"))?,
        })
    }

    pub fn draw(
        &mut self,
        device: &ID3D11Device,
        context: &ID3D11DeviceContext,
        draw_list: &DrawList,
        transform: &FrameTransform,
        screen_size: (u32, u32),
    ) -> MyResult<()> {
        let largest = [
            &draw_list.world.lines,
            &draw_list.world.triangles,
            &draw_list.screen.lines,
            &draw_list.screen.triangles,
        ]
        .iter()
        .map(|vertices| vertices.len())
        .max()
        .unwrap_or(0);
        if largest > self.vertex_capacity {
            self.vertex_capacity = largest.next_power_of_two();
            debug!("Growing vertex buffer to {} vertices", self.vertex_capacity);
            self.vertex_buffer = create_vertex_buffer(device, self.vertex_capacity)?;
        }

        unsafe {
            context.IASetInputLayout(&self.input_layout);
            context.VSSetShader(&self.vertex_shader, None);
            context.VSSetConstantBuffers(0, Some(&[Some(self.constant_buffer.clone())]));
            context.PSSetShader(&self.pixel_shader, None);
            context.RSSetState(&self.rasterizer_state);
        }

        unsafe { context.OMSetDepthStencilState(&self.world_depth_state, 0) };
        self.draw_batch(context, &draw_list.world, &transform.shader_constant())?;

        let (width, height) = screen_size;
        let pixels_to_clip =
            Mat4::orthographic_lh(0.0, width as f32, height as f32, 0.0, 0.0, 1.0);
        unsafe { context.OMSetDepthStencilState(&self.screen_depth_state, 0) };
        self.draw_batch(context, &draw_list.screen, &pixels_to_clip.transpose())?;
        Ok(())
    }

    fn draw_batch(
        &self,
        context: &ID3D11DeviceContext,
        batch: &Batch,
        shader_constant: &Mat4,
    ) -> MyResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let constant = shader_constant.to_cols_array();
        unsafe {
            context.UpdateSubresource(
                &self.constant_buffer,
                0,
                None,
                constant.as_ptr() as *const _,
                0,
                0,
            )
        };
        self.draw_vertices(context, &batch.triangles, D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST)?;
        self.draw_vertices(context, &batch.lines, D3D_PRIMITIVE_TOPOLOGY_LINELIST)?;
        Ok(())
    }

    fn draw_vertices(
        &self,
        context: &ID3D11DeviceContext,
        vertices: &[Vertex],
        topology: D3D_PRIMITIVE_TOPOLOGY,
    ) -> MyResult<()> {
        if vertices.is_empty() {
            return Ok(());
        }
        unsafe {
            let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
            context.Map(&self.vertex_buffer, 0, D3D11_MAP_WRITE_DISCARD, 0, Some(&mut mapped))?;
            std::ptr::copy_nonoverlapping(vertices.as_ptr(), mapped.pData as *mut Vertex, vertices.len());
            context.Unmap(&self.vertex_buffer, 0);

            let stride = std::mem::size_of::<Vertex>() as u32;
            let offset = 0;
            context.IASetVertexBuffers(
                0,
                1,
                Some(&Some(self.vertex_buffer.clone())),
                Some(&stride),
                Some(&offset),
            );
            context.IASetPrimitiveTopology(topology);
            context.Draw(vertices.len() as u32, 0);
        }
        Ok(())
    }
}

fn create_vertex_buffer(device: &ID3D11Device, capacity: usize) -> MyResult<ID3D11Buffer> {
    let desc = D3D11_BUFFER_DESC {
        ByteWidth: (capacity * std::mem::size_of::<Vertex>()) as u32,
        Usage: D3D11_USAGE_DYNAMIC,
        BindFlags: D3D11_BIND_VERTEX_BUFFER.0 as u32,
        CPUAccessFlags: D3D11_CPU_ACCESS_WRITE.0 as u32,
        MiscFlags: 0,
        StructureByteStride: 0,
    };
    let mut buffer = None;
    unsafe { device.CreateBuffer(&desc, None, Some(&mut buffer))? };
    Ok(buffer.ok_or_else(|| eyre!("CreateBuffer returned no vertex buffer"))?)
}

fn create_depth_state(device: &ID3D11Device, depth_test: bool) -> MyResult<ID3D11DepthStencilState> {
    let desc = D3D11_DEPTH_STENCIL_DESC {
        DepthEnable: depth_test.into(),
        DepthWriteMask: D3D11_DEPTH_WRITE_MASK_ALL,
        DepthFunc: D3D11_COMPARISON_LESS,
        StencilEnable: FALSE,
        ..Default::default()
    };
    let mut state = None;
    unsafe { device.CreateDepthStencilState(&desc, Some(&mut state))? };
    Ok(state.ok_or_else(|| eyre!("CreateDepthStencilState returned no state"))?)
}

/// # Safety
/// The slice borrows the blob's buffer and must not outlive it.
unsafe fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe { std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize()) }
}

fn compile_shader(entry_point: PCSTR, target: PCSTR) -> MyResult<ID3DBlob> {
    let flags = if cfg!(debug_assertions) {
        D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION
    } else {
        0
    };

    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompile(
            SHADER_SOURCE.as_ptr() as *const _,
            SHADER_SOURCE.len(),
            s!("line_drawer.hlsl"),
            None, // defines
            None, // include handler
            entry_point,
            target,
            flags,
            0,
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        let compiler_output = error_blob
            .map(|error| unsafe { String::from_utf8_lossy(blob_bytes(&error)).into_owned() })
            .unwrap_or_default();
        return Err(eyre!(
            "Shader compile error ({} {}): {} {}",
            unsafe { entry_point.to_string() }.unwrap_or_default(),
            unsafe { target.to_string() }.unwrap_or_default(),
            e,
            compiler_output.trim()
        )
        .into());
    }
    Ok(shader_blob.ok_or_else(|| eyre!("D3DCompile returned no bytecode"))?)
}
