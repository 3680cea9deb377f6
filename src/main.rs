use clap::Parser;
use pascal_press::controls::{
    validation_checks, EditableValue, FieldSpec, PressureUnit, ResultsReadout,
};
use pascal_press::render::{Camera, GpuContext, OrbitController, PressRenderer};
use pascal_press::{Parameter, PressConfig, PressLayout, PressResult, PressSession, TriggerEvent};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const MAX_FRAME_DT: f32 = 0.1;
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 96, 80);
const OK_COLOR: egui::Color32 = egui::Color32::from_rgb(110, 220, 120);

/// Interactive hydraulic press.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting input force in newtons
    #[arg(long)]
    force: Option<f64>,

    /// Starting input piston radius in meters
    #[arg(long)]
    input_radius: Option<f64>,

    /// Starting output piston radius in meters
    #[arg(long)]
    output_radius: Option<f64>,

    /// Starting input stroke depth in meters
    #[arg(long)]
    stroke_depth: Option<f64>,
}

impl Args {
    fn load_config(&self) -> PressResult<PressConfig> {
        let mut config = match &self.config {
            Some(path) => PressConfig::from_file(path)?,
            None => PressConfig::default(),
        };

        let overrides = [
            (Parameter::InputForce, self.force),
            (Parameter::InputRadius, self.input_radius),
            (Parameter::OutputRadius, self.output_radius),
            (Parameter::StrokeDepth, self.stroke_depth),
        ];
        for (parameter, value) in overrides {
            if let Some(value) = value {
                config.defaults.set(parameter, value);
            }
        }
        Ok(config)
    }
}

struct App {
    window: Option<Arc<Window>>,
    context: Option<GpuContext>,
    renderer: Option<PressRenderer>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    session: PressSession,
    editors: Vec<EditableValue>,
    focus_editor: Option<Parameter>,
    pressure_unit: PressureUnit,
    show_info: bool,
    status: Option<String>,
    last_error: Option<String>,
    camera: Camera,
    orbit: OrbitController,
    mouse_pos: (f32, f32),
    orbiting: bool,
    gui_hovered: bool,
    last_frame: Instant,
}

impl App {
    fn new(session: PressSession, config: &PressConfig) -> Self {
        let editors = FieldSpec::all(session.bounds())
            .into_iter()
            .map(EditableValue::new)
            .collect();

        Self {
            window: None,
            context: None,
            renderer: None,
            egui_state: None,
            egui_renderer: None,
            session,
            editors,
            focus_editor: None,
            pressure_unit: config.display.pressure_unit,
            show_info: config.display.show_info,
            status: None,
            last_error: None,
            camera: Camera::default(),
            orbit: OrbitController::default(),
            mouse_pos: (0.0, 0.0),
            orbiting: false,
            gui_hovered: false,
            last_frame: Instant::now(),
        }
    }

    fn press(&mut self) {
        if self.session.request_press().accepted() {
            self.status = None;
            self.last_error = None;
        }
    }

    fn reset(&mut self) {
        if self.session.reset().accepted() {
            for editor in &mut self.editors {
                editor.cancel();
            }
            self.status = None;
            self.last_error = None;
        }
    }

    fn apply(&mut self, result: PressResult<()>) {
        self.last_error = result.err().map(|err| err.to_string());
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        self.orbit.update();
        self.orbit.update_camera(&mut self.camera);

        if let TriggerEvent::Completed(snapshot) = self.session.advance(dt) {
            self.status = Some(format!(
                "Load lifted {:.2} mm with {:.0} N",
                snapshot.derived.output_displacement * 1000.0,
                snapshot.derived.output_force
            ));
        }
    }

    fn parameter_row(&mut self, ui: &mut egui::Ui, index: usize) {
        let spec = *self.editors[index].spec();
        let parameter = spec.parameter;
        let current = self.session.parameters().get(parameter);

        ui.label(parameter.label());
        ui.horizontal(|ui| {
            let mut shown = current * spec.multiplier;
            let slider = egui::Slider::new(&mut shown, spec.display_min()..=spec.display_max())
                .step_by(spec.range.step * spec.multiplier)
                .fixed_decimals(spec.decimals)
                .show_value(false);
            if ui.add(slider).changed() {
                let result = self.session.set_parameter(parameter, shown / spec.multiplier);
                self.apply(result);
            }

            let editor = &mut self.editors[index];
            let mut committed = None;
            if let Some(buffer) = editor.buffer_mut() {
                let response = ui.add(egui::TextEdit::singleline(buffer).desired_width(64.0));
                if self.focus_editor == Some(parameter) {
                    response.request_focus();
                    self.focus_editor = None;
                }
                ui.label(spec.unit);

                if response.lost_focus() {
                    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        editor.cancel();
                    } else {
                        committed = editor.commit();
                    }
                }
            } else {
                let label = egui::Label::new(spec.format_with_unit(current))
                    .sense(egui::Sense::click());
                if ui.add(label).on_hover_text("Click to edit").clicked() {
                    editor.start_editing(current);
                    self.focus_editor = Some(parameter);
                }
            }

            if let Some(result) = committed {
                let result = result.and_then(|si| self.session.set_parameter(parameter, si));
                self.apply(result);
            }
        });
    }

    fn ui(&mut self, ctx: &egui::Context) {
        egui::Window::new("Hydraulic Press")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                for index in 0..self.editors.len() {
                    self.parameter_row(ui, index);
                }

                ui.separator();
                let pressing = self.session.is_pressing();
                ui.horizontal(|ui| {
                    if ui.add_enabled(!pressing, egui::Button::new("PRESS")).clicked() {
                        self.press();
                    }
                    if ui.add_enabled(!pressing, egui::Button::new("RESET")).clicked() {
                        self.reset();
                    }
                });
                if let Some(progress) = self.session.trigger().progress() {
                    ui.add(egui::ProgressBar::new(progress).show_percentage());
                }
                if let Some(status) = &self.status {
                    ui.label(status.as_str());
                }
                if let Some(error) = &self.last_error {
                    ui.colored_label(ERROR_COLOR, error.as_str());
                }

                ui.separator();
                self.results(ui);

                ui.separator();
                self.validation(ui);

                ui.separator();
                ui.checkbox(&mut self.show_info, "Show Pascal's principle");
                if self.show_info {
                    ui.small("Pressure applied to a confined fluid is transmitted");
                    ui.small("undiminished to every part of the fluid.");
                    ui.small("P = F₁/A₁ = F₂/A₂, so F₂ = F₁·A₂/A₁");
                    ui.small("A₁·d₁ = A₂·d₂: force is gained, travel is lost.");
                }

                ui.separator();
                ui.label("Controls:");
                ui.small("Space: Press");
                ui.small("R: Reset");
                ui.small("Left drag: Orbit camera");
                ui.small("Scroll: Zoom");
            });
    }

    fn results(&mut self, ui: &mut egui::Ui) {
        let readout = ResultsReadout::new(self.session.derived(), self.pressure_unit);

        egui::Grid::new("results").num_columns(2).show(ui, |ui| {
            ui.label("Pressure (P)");
            let toggle = egui::Label::new(readout.pressure).sense(egui::Sense::click());
            if ui
                .add(toggle)
                .on_hover_text(format!("Show in {}", self.pressure_unit.toggled().symbol()))
                .clicked()
            {
                self.pressure_unit = self.pressure_unit.toggled();
            }
            ui.end_row();

            for (label, value) in [
                ("Output Force (F₂)", &readout.output_force),
                ("Output Travel (d₂)", &readout.output_displacement),
                ("Mechanical Advantage", &readout.mechanical_advantage),
                ("Input Area (A₁)", &readout.input_area),
                ("Output Area (A₂)", &readout.output_area),
            ] {
                ui.label(label);
                ui.label(value.as_str());
                ui.end_row();
            }
        });
    }

    fn validation(&self, ui: &mut egui::Ui) {
        let checks = validation_checks(self.session.parameters(), self.session.derived());

        ui.label("Physics validation:");
        for check in checks {
            let (mark, color) = if check.holds { ("✔", OK_COLOR) } else { ("✘", ERROR_COLOR) };
            ui.colored_label(color, format!("{mark} {}", check.label));
        }
    }

    fn render(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let (Some(context), Some(renderer)) = (self.context.as_ref(), self.renderer.as_ref()) else {
            return;
        };
        let Some(egui_state) = self.egui_state.as_mut() else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let layout = PressLayout::build(self.session.parameters(), self.session.offsets());
        renderer.render(context, &view, &layout, &self.camera, self.session.offsets().camera);

        let raw_input = egui_state.take_egui_input(&window);
        let egui_ctx = egui_state.egui_ctx().clone();
        let full_output = egui_ctx.run(raw_input, |ctx| self.ui(ctx));
        self.gui_hovered = egui_ctx.is_pointer_over_area();

        let (Some(context), Some(egui_state), Some(egui_renderer)) = (
            self.context.as_ref(),
            self.egui_state.as_mut(),
            self.egui_renderer.as_mut(),
        ) else {
            return;
        };
        egui_state.handle_platform_output(&window, full_output.platform_output);
        let clipped_primitives = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&context.device, &context.queue, *id, delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [context.size.width, context.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Egui Encoder"),
        });

        egui_renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        context.queue.submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Pascal's Principle: Hydraulic Press")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let context = pollster::block_on(GpuContext::new(window.clone()));
        self.camera.set_aspect(context.aspect_ratio());

        let renderer = PressRenderer::new(&context);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx,
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&context.device, context.config.format, None, 1, false);

        self.context = Some(context);
        self.renderer = Some(renderer);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.last_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            if egui_state.on_window_event(window, &event).consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(context) = &mut self.context {
                    context.resize(size);
                    self.camera.set_aspect(context.aspect_ratio());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    match code {
                        KeyCode::Escape => event_loop.exit(),
                        KeyCode::Space => self.press(),
                        KeyCode::KeyR => self.reset(),
                        _ => {}
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.orbiting = state == ElementState::Pressed && !self.gui_hovered;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                if self.orbiting {
                    self.orbit.rotate(x - self.mouse_pos.0, y - self.mouse_pos.1);
                }
                self.mouse_pos = (x, y);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if !self.gui_hovered {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                    };
                    self.orbit.zoom(scroll);
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.load_config()?;
    let session = PressSession::new(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(session, &config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
