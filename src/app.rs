use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{BADGE_DURATION_MS, CELL_SIZE, GRID_HEIGHT, GRID_WIDTH, TICK_INTERVAL_MS};
use crate::gpu::{BoardPipeline, FrameBuffers, GpuContext};
use crate::report::{self, ReportOutcome};
use crate::simulation::{SimulationRun, TickAction};

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    buffers: Option<FrameBuffers>,
    pipeline: Option<BoardPipeline>,
    run: Option<SimulationRun>,
    last_tick: Instant,
    tick_interval: Duration,
    report_rx: Option<Receiver<ReportOutcome>>,
    badge: Option<(ReportOutcome, Instant)>,
    title: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            buffers: None,
            pipeline: None,
            run: None,
            last_tick: Instant::now(),
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            report_rx: None,
            badge: None,
            title: String::new(),
        }
    }

    /// Advance the simulation if it is running and the pacing interval has
    /// elapsed. Exactly one generation is computed per call; the tick
    /// completes (including the upload) before the next can be scheduled.
    fn advance(&mut self) {
        let (Some(run), Some(gpu), Some(buffers)) =
            (self.run.as_mut(), self.gpu.as_ref(), self.buffers.as_ref())
        else {
            return;
        };

        if run.is_terminal() || self.last_tick.elapsed() < self.tick_interval {
            return;
        }
        self.last_tick = Instant::now();

        match run.tick() {
            TickAction::Continue => {
                buffers.upload_cells(&gpu.queue, run.grid());
            }
            TickAction::Stop(reason) => {
                log::info!(
                    "Steady state reached: {} at generation {} with {} alive",
                    reason.describe(),
                    run.generation(),
                    run.population()
                );
                buffers.upload_cells(&gpu.queue, run.grid());
                buffers.upload_history(&gpu.queue, run.history().series());
                self.report_rx = Some(report::send_final_report(
                    run.population(),
                    run.generation(),
                ));
            }
        }
    }

    /// Collect the report outcome if it arrived, and expire a stale badge.
    fn poll_report(&mut self) {
        if let Some(rx) = &self.report_rx {
            if let Ok(outcome) = rx.try_recv() {
                self.badge = Some((outcome, Instant::now()));
                self.report_rx = None;
            }
        }
        if let Some((_, shown_at)) = self.badge {
            if shown_at.elapsed() >= Duration::from_millis(BADGE_DURATION_MS) {
                self.badge = None;
            }
        }
    }

    fn render(&mut self) {
        let gpu = self.gpu.as_ref().unwrap();
        let buffers = self.buffers.as_ref().unwrap();
        let pipeline = self.pipeline.as_ref().unwrap();

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = pipeline.create_bind_group(
            &gpu.device,
            &buffers.cells_buffer,
            &buffers.history_buffer,
            &buffers.params_buffer,
        );
        pipeline.draw(&mut encoder, &view, &bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    /// Put step/alive stats (and the game-over banner and report badge) in
    /// the window title.
    fn update_title(&mut self) {
        let Some(run) = &self.run else {
            return;
        };

        let mut title = format!(
            "Toroidal Life - Step: {} | Alive: {}",
            format_step(run.generation()),
            run.population()
        );
        if let Some(reason) = run.termination() {
            title.push_str(&format!(" - GAME OVER ({})", reason.describe()));
        }
        match self.badge {
            Some((ReportOutcome::Sent, _)) => title.push_str(" [report sent]"),
            Some((ReportOutcome::Failed, _)) => title.push_str(" [report failed]"),
            None => {}
        }

        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    /// Throw away the finished run and start over from a fresh random grid.
    fn restart(&mut self) {
        let (Some(gpu), Some(buffers)) = (self.gpu.as_ref(), self.buffers.as_ref()) else {
            return;
        };

        log::info!("Restarting with a fresh random grid");
        let run = SimulationRun::new(&mut rand::thread_rng());
        buffers.upload_cells(&gpu.queue, run.grid());
        buffers.update_params(&gpu.queue, false, 0, 0);
        self.run = Some(run);
        self.report_rx = None;
        self.badge = None;
        self.last_tick = Instant::now();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Toroidal Life...");
        log::info!("Grid size: {}x{}", GRID_WIDTH, GRID_HEIGHT);

        let window_attrs = Window::default_attributes()
            .with_title("Toroidal Life")
            .with_inner_size(winit::dpi::LogicalSize::new(
                GRID_WIDTH as u32 * CELL_SIZE,
                GRID_HEIGHT as u32 * CELL_SIZE,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()));

        let run = SimulationRun::new(&mut rand::thread_rng());
        log::info!("Initial population: {}", run.population());

        let buffers = FrameBuffers::new(&gpu.device, &gpu.queue, run.grid());
        let pipeline = BoardPipeline::new(&gpu.device, gpu.format());

        log::info!("Initialization complete");
        log::info!("Controls:");
        log::info!("  R: Restart with a fresh random grid");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.buffers = Some(buffers);
        self.pipeline = Some(pipeline);
        self.run = Some(run);
        self.last_tick = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        }
                        PhysicalKey::Code(KeyCode::KeyR) => {
                            self.restart();
                        }
                        _ => {}
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.poll_report();
                self.advance();
                self.render();
                self.update_title();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Compact a step count for display: values below 1000 are exact, larger
/// values are shown in thousands with at most one decimal place.
fn format_step(n: u32) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let thousands = n as f64 / 1000.0;
    let text = if thousands >= 100.0 {
        format!("{}", thousands.round())
    } else {
        let rounded = (thousands * 10.0).round() / 10.0;
        if rounded == rounded.trunc() {
            format!("{}", rounded.trunc())
        } else {
            format!("{:.1}", rounded)
        }
    };
    format!("{}K", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_step_small_values_exact() {
        assert_eq!(format_step(0), "0");
        assert_eq!(format_step(7), "7");
        assert_eq!(format_step(999), "999");
    }

    #[test]
    fn test_format_step_thousands() {
        assert_eq!(format_step(1000), "1K");
        assert_eq!(format_step(1500), "1.5K");
        assert_eq!(format_step(2040), "2K");
        assert_eq!(format_step(2050), "2.1K");
        assert_eq!(format_step(99940), "99.9K");
    }

    #[test]
    fn test_format_step_large_values_round_to_whole_k() {
        assert_eq!(format_step(123000), "123K");
        assert_eq!(format_step(123600), "124K");
    }
}
