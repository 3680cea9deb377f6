//! WASM entry point: the press scene on a canvas, driven from the keyboard.

use crate::animation::{PressListener, PressSnapshot};
use crate::render::{Camera, GpuContext, OrbitController, PressRenderer};
use crate::scene::PressLayout;
use crate::session::PressSession;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::web::EventLoopExtWebSys;
use winit::platform::web::WindowAttributesExtWebSys;
use winit::window::{Window, WindowId};

struct ConsoleListener;

impl PressListener for ConsoleListener {
    fn on_complete(&mut self, snapshot: &PressSnapshot) {
        log::info!(
            "load lifted {:.2} mm with {:.0} N (MA {:.1}x)",
            snapshot.derived.output_displacement * 1000.0,
            snapshot.derived.output_force,
            snapshot.derived.mechanical_advantage()
        );
    }
}

struct AppState {
    context: Option<GpuContext>,
    renderer: Option<PressRenderer>,
}

struct App {
    window: Option<Arc<Window>>,
    state: Rc<RefCell<AppState>>,
    session: PressSession,
    camera: Camera,
    orbit: OrbitController,
    mouse_pos: (f32, f32),
    orbiting: bool,
    last_time: f64,
    init_pending: bool,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            state: Rc::new(RefCell::new(AppState {
                context: None,
                renderer: None,
            })),
            session: PressSession::default().with_listener(ConsoleListener),
            camera: Camera::default(),
            orbit: OrbitController::default(),
            mouse_pos: (0.0, 0.0),
            orbiting: false,
            last_time: 0.0,
            init_pending: false,
        }
    }

    fn update(&mut self, dt: f32) {
        self.orbit.update();
        self.orbit.update_camera(&mut self.camera);
        self.session.advance(dt);
    }

    fn render(&mut self) {
        let state = self.state.borrow();
        let (Some(context), Some(renderer)) = (state.context.as_ref(), state.renderer.as_ref()) else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(o) => o,
            Err(_) => return,
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let layout = PressLayout::build(self.session.parameters(), self.session.offsets());
        renderer.render(context, &view, &layout, &self.camera, self.session.offsets().camera);
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_pending {
            return;
        }
        self.init_pending = true;

        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no canvas element with id 'canvas'");
            return;
        };

        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let window_attrs = Window::default_attributes()
            .with_canvas(Some(canvas))
            .with_inner_size(PhysicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                return;
            }
        };
        self.window = Some(window.clone());

        let state = self.state.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let context = GpuContext::new(window.clone()).await;
            let renderer = PressRenderer::new(&context);

            let mut state = state.borrow_mut();
            state.context = Some(context);
            state.renderer = Some(renderer);

            window.request_redraw();
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                let mut state = self.state.borrow_mut();
                if let Some(context) = &mut state.context {
                    context.resize(size);
                    self.camera.set_aspect(context.aspect_ratio());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Space) => {
                        let _ = self.session.request_press();
                    }
                    PhysicalKey::Code(KeyCode::KeyR) => {
                        let _ = self.session.reset();
                    }
                    _ => {}
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.orbiting = state == ElementState::Pressed;
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
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.orbit.zoom(scroll);
            }

            WindowEvent::RedrawRequested => {
                {
                    let state = self.state.borrow();
                    if let Some(context) = &state.context {
                        self.camera.set_aspect(context.aspect_ratio());
                    }
                }

                let now = web_sys::window()
                    .and_then(|w| w.performance())
                    .map(|p| p.now())
                    .unwrap_or(0.0);

                let dt = if self.last_time > 0.0 {
                    ((now - self.last_time) / 1000.0) as f32
                } else {
                    1.0 / 60.0
                };
                self.last_time = now;

                self.update(dt.min(0.1));
                self.render();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger init failed: {err}").into());
    }

    match EventLoop::new() {
        Ok(event_loop) => event_loop.spawn_app(App::new()),
        Err(err) => log::error!("failed to create event loop: {err}"),
    }
}
