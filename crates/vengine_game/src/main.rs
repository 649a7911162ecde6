//! Vengine -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Every rendered frame
//! runs exactly one simulation tick inside `RedrawRequested`:
//!
//!   1. `begin_frame()` -- measure wall-clock delta for the overlay
//!   2. snapshot keys (held movement, P/X edges) and `World::tick` once
//!   3. play the jump sound if the tick started a jump
//!   4. rebuild the sprite mesh from the draw list, render, composite egui
//!   5. present, clear edge input, schedule the next frame 16 ms later
//!
//! The loop sleeps between frames with `ControlFlow::WaitUntil`, so the frame
//! rate is render time plus the fixed delay.

mod assets;
mod audio;
mod collision;
mod config;
mod draw;
mod error;
mod monster;
mod player;
#[cfg(test)]
mod replay;
mod session;
mod sprite_sheet;
mod world;

use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use assets::{AssetId, AssetLoader};
use audio::AudioManager;
use config::WorldConfig;
use draw::{build_draw_list, DrawCommand, TextureKey};
use error::GameError;
use session::SessionState;
use sprite_sheet::SpriteSheet;
use vengine_core::input::{InputState, Key};
use vengine_core::time::TimeState;
use vengine_devtools::{DebugOverlay, OverlayActions, OverlayStats};
use vengine_platform::window::PlatformConfig;
use vengine_render::texture::uv_rect_for;
use vengine_render::vertex::{quad_vertices, QUAD_INDICES};
use vengine_render::{GpuContext, ScreenCamera, SpritePipeline, SpriteVertex, Texture};
use world::{TickInput, World};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A contiguous run of indices that share the same texture binding.
/// Consecutive quads with the same texture are merged into one call.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DrawCall {
    texture: TextureKey,
    index_start: u32,
    index_count: u32,
}

#[derive(Debug, Default)]
struct SpriteMesh {
    vertices: Vec<SpriteVertex>,
    indices: Vec<u32>,
    draw_calls: Vec<DrawCall>,
}

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// All mutable engine state. Built in `ApplicationHandler::resumed` once the
/// window exists; dropping it releases audio, textures and the GPU surface.
struct EngineState {
    window: Arc<Window>,
    title: String,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    camera: ScreenCamera,
    sprite_pipeline: SpritePipeline,
    debug_overlay: DebugOverlay,
    textures: HashMap<TextureKey, GpuSpriteTexture>,
    audio: AudioManager,

    world: World,
    sprite_sheet: SpriteSheet,
    // Overlay clicks land after the tick has run; they apply next frame.
    pending_actions: OverlayActions,

    // The sprite mesh is rebuilt on the CPU each frame, then streamed into
    // these buffers. Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
    sprite_count: usize,
}

impl EngineState {
    fn new(window: Arc<Window>, title: &str) -> Result<Self, GameError> {
        let gpu = GpuContext::new(window.clone()).map_err(GameError::Gpu)?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let loader = AssetLoader::new();
        let mut textures = HashMap::new();
        for key in TextureKey::ALL {
            let texture = load_texture_asset(&gpu, &sprite_pipeline, &loader, key.asset())?;
            textures.insert(key, texture);
        }
        let audio = AudioManager::new(loader.load_bytes(AssetId::JumpSound)?)?;
        log::info!("Loaded {} textures and the jump sound", textures.len());

        let world_config = WorldConfig::default();
        let sprite_sheet = SpriteSheet::new(
            world_config.player_width as u32,
            world_config.player_height as u32,
        );
        let camera = ScreenCamera::new(
            world_config.screen_width as u32,
            world_config.screen_height as u32,
        );

        let camera_uniform = camera.build_uniform();
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            window,
            title: title.to_string(),
            gpu,
            time: TimeState::new(),
            input: InputState::new(),
            camera,
            sprite_pipeline,
            debug_overlay,
            textures,
            audio,
            world: World::new(world_config),
            sprite_sheet,
            pending_actions: OverlayActions::default(),
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
            sprite_count: 0,
        };

        state.ensure_mesh_capacity(4, 6);
        state.rebuild_scene_mesh();
        Ok(state)
    }

    fn tick_input(&mut self) -> TickInput {
        let actions = std::mem::take(&mut self.pending_actions);
        TickInput {
            left: self.input.is_held(Key::Left),
            right: self.input.is_held(Key::Right),
            jump: self.input.is_held(Key::Up),
            toggle_pause: self.input.is_just_pressed(Key::P) || actions.toggle_pause,
            restart: self.input.is_just_pressed(Key::X) || actions.restart,
        }
    }

    fn overlay_stats(&self) -> OverlayStats {
        let player = &self.world.player;
        OverlayStats {
            draw_calls: self.draw_calls.len() as u32,
            texture_binds: count_texture_binds(&self.draw_calls) as u32,
            sprite_count: self.sprite_count as u32,
            memory_estimate_mb: self.estimate_memory_mb(),
            session_label: self.world.session.label().to_string(),
            paused: self.world.session == SessionState::Paused,
            dead: self.world.session == SessionState::Dead,
            player_x: player.x,
            player_y: player.y,
            player_velocity_x: player.velocity_x,
            player_velocity_y: player.velocity_y,
            player_on_ground: player.on_ground,
            animation_label: player.animation.label().to_string(),
            animation_frame: player.frames.current_frame,
            monster_x: self.world.monster.x,
        }
    }

    fn estimate_memory_mb(&self) -> f32 {
        let mut bytes: usize = 0;
        for tex in self.textures.values() {
            let (w, h) = tex.texture.size;
            bytes += (w as usize) * (h as usize) * 4;
        }
        bytes += self.mesh_vertex_capacity * std::mem::size_of::<SpriteVertex>();
        bytes += self.mesh_index_capacity * std::mem::size_of::<u32>();
        bytes as f32 / (1024.0 * 1024.0)
    }

    fn rebuild_scene_mesh(&mut self) {
        let commands = build_draw_list(&self.world, &self.sprite_sheet);
        let mesh = build_sprite_mesh(&commands, |key| {
            self.textures.get(&key).map(|t| t.texture.size)
        });
        self.ensure_mesh_capacity(mesh.vertices.len(), mesh.indices.len());
        self.sprite_count = mesh.vertices.len() / 4;
        self.draw_calls = mesh.draw_calls;

        if !mesh.vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));
        }
        if !mesh.indices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));
        }
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    /// One frame: tick, sound, mesh, render, present. Returns false when the
    /// player asked to quit.
    fn frame(&mut self) -> bool {
        self.time.begin_frame();

        if self.input.is_just_pressed(Key::Escape) {
            return false;
        }
        if self.input.is_just_pressed(Key::F3) {
            self.debug_overlay.toggle();
        }

        let input = self.tick_input();
        let events = self.world.tick(input, self.time.ticks_ms());
        if events.jumped {
            self.audio.play_jump();
        }
        if events.caught || events.restarted || events.pause_toggled {
            self.window
                .set_title(&window_title(&self.title, self.world.session));
        }

        self.rebuild_scene_mesh();

        let camera_uniform = self.camera.build_uniform();
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        if let Some((output, view)) = self.gpu.begin_frame() {
            let stats = self.overlay_stats();
            let (egui_primitives, egui_textures_delta, overlay_actions) =
                self.debug_overlay
                    .prepare(&self.window, &self.time, Some(stats));
            self.pending_actions = overlay_actions;

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
                pixels_per_point: self.window.scale_factor() as f32,
            };

            let mut encoder =
                self.gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Render Encoder"),
                    });

            {
                let mut last_bound: Option<TextureKey> = None;
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                for draw in &self.draw_calls {
                    if let Some(texture) = self.textures.get(&draw.texture) {
                        if last_bound != Some(draw.texture) {
                            render_pass.set_bind_group(1, &texture.bind_group, &[]);
                            last_bound = Some(draw.texture);
                        }
                        render_pass.draw_indexed(
                            draw.index_start..(draw.index_start + draw.index_count),
                            0,
                            0..1,
                        );
                    }
                }
            }

            self.debug_overlay.upload(
                &self.gpu.device,
                &self.gpu.queue,
                &mut encoder,
                &egui_primitives,
                &egui_textures_delta,
                &screen_descriptor,
            );

            {
                let mut egui_pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui Render Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    })
                    .forget_lifetime();

                self.debug_overlay
                    .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
            }

            self.debug_overlay.cleanup(&egui_textures_delta);

            self.gpu.queue.submit(std::iter::once(encoder.finish()));
            output.present();
        }

        self.input.end_frame();
        self.time.end_frame();
        true
    }
}

#[derive(Default)]
struct App {
    config: PlatformConfig,
    state: Option<EngineState>,
    startup_error: Option<GameError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: GameError) {
        log::error!("{err}");
        self.startup_error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.startup_error.is_some() {
            return;
        }
        let window = match vengine_platform::window::create_window(event_loop, &self.config) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, GameError::Window(err)),
        };
        match EngineState::new(window, &self.config.title) {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            if state.time.should_render(Instant::now()) {
                event_loop.set_control_flow(ControlFlow::Wait);
                state.window.request_redraw();
            } else {
                event_loop.set_control_flow(ControlFlow::WaitUntil(state.time.next_frame_at()));
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::Focused(false) => {
                state.input.release_all();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    route_key(&mut state.input, key_code, event.state, egui_consumed);
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }
                if !state.frame() {
                    log::info!("Escape pressed, exiting.");
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

/// Turn the draw list into one indexed quad mesh. Source rectangles become
/// UVs using the texture's pixel size; commands whose texture is unknown are
/// skipped.
fn build_sprite_mesh(
    commands: &[DrawCommand],
    texture_size: impl Fn(TextureKey) -> Option<(u32, u32)>,
) -> SpriteMesh {
    let mut mesh = SpriteMesh {
        vertices: Vec::with_capacity(commands.len() * 4),
        indices: Vec::with_capacity(commands.len() * 6),
        draw_calls: Vec::with_capacity(8),
    };

    for command in commands {
        let Some(size) = texture_size(command.texture) else {
            continue;
        };
        let uv = match command.source {
            Some(src) => uv_rect_for(size, src.x, src.y, src.w, src.h),
            None => [0.0, 0.0, 1.0, 1.0],
        };
        let dest = command.dest;
        let base_index = mesh.vertices.len() as u32;
        mesh.vertices.extend_from_slice(&quad_vertices(
            dest.x as f32,
            dest.y as f32,
            dest.w as f32,
            dest.h as f32,
            uv,
            WHITE,
        ));

        let draw_start = mesh.indices.len() as u32;
        mesh.indices
            .extend(QUAD_INDICES.iter().map(|i| base_index + i));
        push_draw_call(
            &mut mesh.draw_calls,
            command.texture,
            draw_start,
            QUAD_INDICES.len() as u32,
        );
    }

    mesh
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture: TextureKey,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if last.texture == texture && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture,
        index_start,
        index_count,
    });
}

fn load_texture_asset(
    gpu: &GpuContext,
    pipeline: &SpritePipeline,
    loader: &AssetLoader,
    id: AssetId,
) -> Result<GpuSpriteTexture, GameError> {
    let bytes = loader.load_bytes(id)?;
    let texture = Texture::from_bytes(&gpu.device, &gpu.queue, &bytes, id.file_name())
        .map_err(GameError::Texture)?;
    log::info!(
        "Texture '{}' loaded ({}x{})",
        id.file_name(),
        texture.size.0,
        texture.size.1
    );
    let bind_group = pipeline.create_texture_bind_group(&gpu.device, &texture);
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
}

fn count_texture_binds(draw_calls: &[DrawCall]) -> usize {
    let mut binds = 0usize;
    let mut current: Option<TextureKey> = None;
    for draw in draw_calls {
        if current != Some(draw.texture) {
            current = Some(draw.texture);
            binds += 1;
        }
    }
    binds
}

/// Releases always reach the input state so a key cannot stay held while the
/// overlay has focus. Presses the overlay consumed are dropped.
fn route_key(
    input: &mut InputState,
    key_code: KeyCode,
    element_state: ElementState,
    egui_consumed: bool,
) {
    let Some(key) = map_key(key_code) else {
        return;
    };
    match element_state {
        ElementState::Released => input.key_up(key),
        ElementState::Pressed if !egui_consumed => input.key_down(key),
        ElementState::Pressed => {}
    }
}

fn window_title(base: &str, session: SessionState) -> String {
    match session {
        SessionState::Running => base.to_string(),
        SessionState::Paused => format!("{base} [paused]"),
        SessionState::Dead => format!("{base} [caught, press X]"),
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::KeyP => Some(Key::P),
        KeyCode::KeyX => Some(Key::X),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn run() -> Result<(), GameError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::default();
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Vengine starting...");

    match run() {
        Ok(()) => {
            log::info!("Goodbye.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("vengine: {err}");
            ExitCode::FAILURE
        }
    }
}
