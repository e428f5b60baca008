use std::{path::PathBuf, sync::Arc, thread::JoinHandle};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    config::{KeyBindings, KitchenConfig},
    content::{deferred_models, spawn_loader, ContentEvent},
    frame::FrameDriver,
    gfx::rendering::RenderEngine,
    interaction::{InputTranslator, Viewport},
};

/// The kitchen viewer: window, renderer and frame loop
///
/// ```no_run
/// use kitchenette::KitchenApp;
///
/// KitchenApp::new()
///     .with_title("Kitchen")
///     .with_model_dir("assets/models")
///     .run()
///     .expect("kitchen exited with an error");
/// ```
pub struct KitchenApp {
    config: KitchenConfig,
}

struct AppState {
    config: KitchenConfig,
    proxy: EventLoopProxy<ContentEvent>,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    driver: FrameDriver,
    input: InputTranslator,
    loader: Option<JoinHandle<()>>,
    error: Option<anyhow::Error>,
}

impl KitchenApp {
    pub fn new() -> Self {
        Self::with_config(KitchenConfig::default())
    }

    pub fn with_config(config: KitchenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.model_dir = dir.into();
        self
    }

    pub fn with_key_bindings(mut self, keys: KeyBindings) -> Self {
        self.config.keys = keys;
        self
    }

    /// Keep the burger spinning while the orbit camera is active
    pub fn with_continuous_spin(mut self, continuous: bool) -> Self {
        self.config.spin_continuous = continuous;
        self
    }

    pub fn with_clear_color(mut self, color: wgpu::Color) -> Self {
        self.config.clear_color = color;
        self
    }

    /// Open the window and run until it is closed
    pub fn run(self) -> anyhow::Result<()> {
        let event_loop = EventLoop::<ContentEvent>::with_user_event()
            .build()
            .context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(self.config, event_loop.create_proxy());
        event_loop
            .run_app(&mut state)
            .context("event loop terminated abnormally")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for KitchenApp {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    fn new(config: KitchenConfig, proxy: EventLoopProxy<ContentEvent>) -> Self {
        let viewport = Viewport::new(config.width, config.height);
        let driver = FrameDriver::kitchen(&config, viewport);
        Self {
            config,
            proxy,
            window: None,
            render_engine: None,
            driver,
            input: InputTranslator::new(),
            loader: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn start_loader(&mut self) -> anyhow::Result<()> {
        let proxy = self.proxy.clone();
        let handle = spawn_loader(deferred_models(&self.config), move |tree| {
            proxy.send_event(ContentEvent::Loaded(tree)).is_ok()
        })
        .context("failed to start loading deferred content")?;
        self.loader = Some(handle);
        Ok(())
    }
}

impl ApplicationHandler<ContentEvent> for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, anyhow::Error::new(err).context("failed to create window")),
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let clear_color = self.config.clear_color;
        let renderer = pollster::block_on(async move {
            RenderEngine::new(window, width, height, clear_color).await
        });
        match renderer {
            Ok(renderer) => self.render_engine = Some(renderer),
            Err(err) => {
                return self.fail(event_loop, anyhow::Error::new(err).context("failed to initialise renderer"))
            }
        }
        self.driver.resize(width, height);

        if self.loader.is_none() {
            if let Err(err) = self.start_loader() {
                self.fail(event_loop, err);
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ContentEvent) {
        match event {
            ContentEvent::Loaded(tree) => {
                self.driver.attach_content(tree);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.driver.resize(*width, *height);
                render_engine.resize(*width, *height);
                return;
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && key_event.state == ElementState::Pressed
                {
                    event_loop.exit();
                    return;
                }
                self.driver.process_keyboard_event(key_event);
            }
            WindowEvent::RedrawRequested => {
                self.driver.tick(render_engine);
                if render_engine.has_failed() {
                    self.fail(event_loop, anyhow::anyhow!("graphics device can no longer render"));
                }
                return;
            }
            _ => (),
        }

        if let Some(input) = self.input.translate(&event) {
            self.driver.handle_input(input);
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.window.is_none() {
            return;
        }
        self.driver.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
