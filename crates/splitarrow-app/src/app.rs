//! Core application state and lifecycle.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use kurbo::{Point, Size};
use splitarrow_core::SelectorView;
use splitarrow_render::{RenderContext, Renderer, VelloRenderer};
use vello::util::RenderSurface;
use vello::wgpu::{self, PresentMode};
use vello::{AaConfig, RenderParams, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::{AppConfig, AppError, AppResult, Backend};
use crate::host::{HostScreen, SelectionLog};
use crate::ui::{render_ui, UiState};

/// Panel outline color when outlines are switched on.
const OUTLINE_COLOR: peniko::Color = peniko::Color::from_rgb8(59, 130, 246);

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    selector_renderer: VelloRenderer,
    texture_blitter: wgpu::util::TextureBlitter,

    // UI
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    selector: SelectorView,
    selection_log: Rc<RefCell<SelectionLog>>,
    /// Copy of the log read by the UI, refreshed when its revision changes.
    log_view: SelectionLog,
    /// Last cursor position in logical pixels.
    cursor: Option<Point>,
    config: AppConfig,
}

impl AppState {
    /// Window size in logical pixels.
    fn logical_size(&self) -> Size {
        let size = self.window.inner_size();
        let scale = self.window.scale_factor();
        Size::new(size.width as f64 / scale, size.height as f64 / scale)
    }

    /// Center the selector in the window.
    fn relayout(&mut self) {
        let bounds = self.config.selector_bounds(self.logical_size());
        self.selector.set_frame(bounds);
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        let scale = self.window.scale_factor();
        Point::new(position.x / scale, position.y / scale)
    }

    /// Whether the app routes pointer events to the selector itself.
    fn routes_pointer(&self) -> bool {
        self.config.backend == Backend::Vello
    }

    /// Run one egui frame and apply the action it produced, if any.
    fn run_ui(&mut self) -> egui::FullOutput {
        // The egui selector writes to the log mid-frame, so the UI reads a copy
        self.log_view.sync_from(&self.selection_log.borrow());

        let input = self.egui_state.take_egui_input(&self.window);
        let Self {
            egui_ctx,
            ui_state,
            selector,
            selection_log,
            log_view,
            config,
            ..
        } = self;
        egui_ctx.run(input, |ctx| {
            if let Some(action) = render_ui(ctx, ui_state, selector, log_view, config) {
                log::debug!("UI action: {:?}", action);
                action.apply(selector, &mut selection_log.borrow_mut());
            }
        })
    }

    /// Build the Vello scene: background, plus the selector unless egui draws it.
    fn build_scene(&mut self) -> Scene {
        let frames = match self.config.backend {
            Backend::Vello => vec![self.selector.frame()],
            Backend::Egui => Vec::new(),
        };
        let viewport = Size::new(
            self.surface.config.width as f64,
            self.surface.config.height as f64,
        );
        let outline = self.ui_state.show_outline.then_some(OUTLINE_COLOR);
        let render_ctx = RenderContext::new(&frames, viewport)
            .with_scale_factor(self.window.scale_factor())
            .with_background(self.config.background_color)
            .with_outline(outline);
        self.selector_renderer.build_scene(&render_ctx);
        self.selector_renderer.take_scene()
    }

    /// Draw `scene` and the egui overlay to the window and present.
    fn render_frame(
        &mut self,
        render_cx: &vello::util::RenderContext,
        scene: &Scene,
        overlay: &Overlay<'_>,
    ) -> AppResult<()> {
        let handle = &render_cx.devices[self.surface.dev_id];
        let (device, queue) = (&handle.device, &handle.queue);
        let (width, height) = (self.surface.config.width, self.surface.config.height);

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| AppError::Render(format!("surface texture unavailable: {:?}", e)))?;
        let target = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let scene_view = scene_target(device, width, height);
        let params = RenderParams {
            base_color: self.config.background_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };
        self.vello_renderer
            .render_to_texture(device, queue, scene, &scene_view, &params)
            .map_err(|e| AppError::Render(format!("{:?}", e)))?;

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("selector frame"),
        });
        self.texture_blitter
            .copy(device, &mut encoder, &scene_view, &target);
        self.draw_overlay(device, queue, &mut encoder, &target, overlay, [width, height]);
        queue.submit(std::iter::once(encoder.finish()));

        for id in &overlay.textures.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
        Ok(())
    }

    /// Record the egui pass on top of whatever `target` already holds.
    fn draw_overlay(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        overlay: &Overlay<'_>,
        size_in_pixels: [u32; 2],
    ) {
        for (id, delta) in &overlay.textures.set {
            self.egui_renderer.update_texture(device, queue, *id, delta);
        }
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: overlay.pixels_per_point,
        };
        self.egui_renderer
            .update_buffers(device, queue, encoder, overlay.primitives, &screen);

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui overlay"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        self.egui_renderer
            .render(&mut pass, overlay.primitives, &screen);
    }
}

/// Tessellated egui output for one frame.
struct Overlay<'a> {
    primitives: &'a [egui::ClippedPrimitive],
    textures: &'a egui::TexturesDelta,
    pixels_per_point: f32,
}

/// Storage-bindable Rgba8Unorm texture for Vello to render into.
fn scene_target(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("selector scene"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::STORAGE_BINDING
            | wgpu::TextureUsages::COPY_SRC
            | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// First fatal error hit inside the event loop.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            error: None,
        }
    }

    /// Run the application with configuration read from the environment.
    pub async fn run() -> AppResult<()> {
        let config = AppConfig::from_env()?;
        log::info!("Selector backend: {:?}", config.backend);

        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> AppResult<()> {
        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| AppError::Surface(e.to_string()))?;

        self.finish_init(window, surface)
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) -> AppResult<()> {
        let render_cx = self
            .render_cx
            .as_ref()
            .ok_or_else(|| AppError::Renderer("render context not initialized".to_string()))?;
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| AppError::Renderer(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm
        let texture_blitter = wgpu::util::TextureBlitter::new(device, surface.config.format);

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut selector = SelectorView::new(kurbo::Rect::ZERO, self.config.selector.clone());
        let selection_log = HostScreen::attach(&mut selector, self.config.initial_direction);

        log::info!(
            "SplitArrow initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );

        let mut state = AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            selector_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::from_config(&self.config.selector),
            selector,
            selection_log,
            log_view: SelectionLog::default(),
            cursor: None,
            config: self.config.clone(),
        };
        state.relayout();
        self.state = Some(state);

        // Request initial redraw
        window.request_redraw();
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        // Don't route pointer input to the selector while egui is using it
        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.relayout();
                state.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                state.relayout();
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = state.to_logical(position);
                state.cursor = Some(point);
                if !state.routes_pointer() || egui_wants_input {
                    return;
                }
                state.selector.pointer_moved(point);
            }

            WindowEvent::CursorLeft { .. } => {
                state.cursor = None;
                if state.routes_pointer() {
                    state.selector.pointer_cancel();
                }
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button: MouseButton::Left,
                ..
            } => {
                if !state.routes_pointer() {
                    return;
                }
                match btn_state {
                    ElementState::Pressed if !egui_wants_input => {
                        if let Some(position) = state.cursor {
                            state.selector.pointer_down(position);
                        }
                    }
                    ElementState::Released => {
                        match state.cursor {
                            Some(position) => {
                                state.selector.pointer_up(position);
                            }
                            None => state.selector.pointer_cancel(),
                        }
                    }
                    _ => {}
                }
                state.window.request_redraw();
            }

            WindowEvent::Touch(touch) => {
                if !state.routes_pointer() {
                    return;
                }
                let point = state.to_logical(touch.location);
                match touch.phase {
                    TouchPhase::Started if !egui_wants_input => state.selector.pointer_down(point),
                    TouchPhase::Started => {}
                    TouchPhase::Moved => state.selector.pointer_moved(point),
                    TouchPhase::Ended => {
                        state.selector.pointer_up(point);
                    }
                    TouchPhase::Cancelled => state.selector.pointer_cancel(),
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let egui::FullOutput {
                    platform_output,
                    textures_delta,
                    shapes,
                    pixels_per_point,
                    viewport_output,
                } = state.run_ui();

                let repaint_now = viewport_output
                    .get(&egui::ViewportId::ROOT)
                    .is_some_and(|v| v.repaint_delay.is_zero());
                state
                    .egui_state
                    .handle_platform_output(&state.window, platform_output);
                let primitives = state.egui_ctx.tessellate(shapes, pixels_per_point);

                let scene = state.build_scene();
                let animating = state.selector.is_animating();
                state.selector.tick();

                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                let overlay = Overlay {
                    primitives: &primitives,
                    textures: &textures_delta,
                    pixels_per_point,
                };
                if let Err(e) = state.render_frame(render_cx, &scene, &overlay) {
                    log::warn!("{}", e);
                }

                if animating || repaint_now {
                    state.window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
