//! Debug overlay rendered via egui on top of the game scene.
//!
//! egui needs a `RenderPass<'static>` while `begin_render_pass` borrows the
//! encoder, so a frame goes through four calls:
//!
//!   1. `prepare()` -- run the UI, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers
//!   3. `paint()`   -- render into a pass created with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The window is only built while `visible` (F3). Event handling stays active
//! so the overlay can take clicks when shown.

use vengine_core::time::TimeState;
use winit::window::Window;

/// Snapshot of game state shown in the overlay, taken once per frame.
#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub draw_calls: u32,
    pub texture_binds: u32,
    pub sprite_count: u32,
    /// Texture plus mesh buffer memory, in megabytes
    pub memory_estimate_mb: f32,
    /// "running", "paused" or "dead"
    pub session_label: String,
    pub paused: bool,
    pub dead: bool,
    pub player_x: i32,
    pub player_y: i32,
    pub player_velocity_x: i32,
    pub player_velocity_y: i32,
    pub player_on_ground: bool,
    pub animation_label: String,
    pub animation_frame: u32,
    pub monster_x: i32,
}

/// Button clicks from this frame. They mean the same as the P and X keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayActions {
    pub toggle_pause: bool,
    pub restart: bool,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        // Hidden overlay never swallows game keys.
        self.visible && response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        stats: Option<OverlayStats>,
    ) -> (
        Vec<egui::ClippedPrimitive>,
        egui::TexturesDelta,
        OverlayActions,
    ) {
        let mut actions = OverlayActions::default();
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if self.visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 10.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                        ui.label(format!("Frame: {}", time.frame_count));
                        if let Some(ref stats) = stats {
                            ui.separator();
                            ui.label(format!("Draw calls: {}", stats.draw_calls));
                            ui.label(format!("Texture binds: {}", stats.texture_binds));
                            ui.label(format!("Sprites: {}", stats.sprite_count));
                            ui.label(format!("Memory: {:.1} MB", stats.memory_estimate_mb));

                            ui.separator();
                            ui.label(format!("Session: {}", stats.session_label));
                            ui.label(player_summary(stats));
                            ui.label(format!(
                                "Animation: {} frame {}",
                                stats.animation_label, stats.animation_frame
                            ));
                            ui.label(format!("Monster x: {}", stats.monster_x));

                            ui.separator();
                            ui.horizontal(|ui| {
                                let pause_label = if stats.paused { "Resume" } else { "Pause" };
                                if ui
                                    .add_enabled(!stats.dead, egui::Button::new(pause_label))
                                    .clicked()
                                {
                                    actions.toggle_pause = true;
                                }
                                if ui
                                    .add_enabled(stats.dead, egui::Button::new("Restart"))
                                    .clicked()
                                {
                                    actions.restart = true;
                                }
                            });
                            if stats.paused {
                                ui.label("\u{23f8} PAUSED");
                            }
                            if stats.dead {
                                ui.label("Caught! Press X to restart.");
                            }
                        }
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn player_summary(stats: &OverlayStats) -> String {
    format!(
        "Player: ({}, {}) v=({}, {}) {}",
        stats.player_x,
        stats.player_y,
        stats.player_velocity_x,
        stats.player_velocity_y,
        if stats.player_on_ground {
            "grounded"
        } else {
            "airborne"
        }
    )
}
