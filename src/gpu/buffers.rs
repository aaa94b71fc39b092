use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::config::GRAPH_MAX_SAMPLES;
use crate::simulation::Grid;

/// GPU-side view of one frame: the cell field, the population series for
/// the termination graph, and the render parameters.
///
/// The simulation runs on the CPU (each generation is an immutable
/// snapshot), so there is no ping-pong here: the current grid is uploaded
/// wholesale after every tick and the shader only ever reads.
pub struct FrameBuffers {
    /// One u32 per cell, row-major, 1 = alive
    pub cells_buffer: Buffer,
    /// Population per generation, uploaded once on termination
    pub history_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub params_buffer: Buffer,
    width: u32,
    height: u32,
}

/// Render parameters passed to the board shader (32 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    pub grid_width: u32,
    pub grid_height: u32,
    /// 1 = run terminated: dim the board and draw the graph
    pub terminal: u32,
    /// Number of valid entries in the history buffer
    pub history_len: u32,
    /// Maximum of the uploaded series, for vertical scaling
    pub history_max: u32,
    pub _padding: [u32; 3],
}

impl FrameBuffers {
    /// Create the buffers and upload the initial grid
    pub fn new(device: &Device, queue: &Queue, initial: &Grid) -> Self {
        let width = initial.width() as u32;
        let height = initial.height() as u32;
        let cell_count = (width * height) as usize;

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cells-buffer"),
            size: (cell_count * std::mem::size_of::<u32>()) as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let history_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("history-buffer"),
            size: (GRAPH_MAX_SAMPLES * std::mem::size_of::<u32>()) as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let buffers = Self {
            cells_buffer,
            history_buffer,
            params_buffer,
            width,
            height,
        };
        buffers.upload_cells(queue, initial);
        buffers.update_params(queue, false, 0, 0);
        buffers
    }

    /// Upload the current grid snapshot
    pub fn upload_cells(&self, queue: &Queue, grid: &Grid) {
        let words: Vec<u32> = grid.cells().iter().map(|&c| c as u32).collect();
        queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(&words));
    }

    /// Upload the population series for the termination graph and flip the
    /// terminal flag. Series longer than the buffer are strided down to fit.
    pub fn upload_history(&self, queue: &Queue, series: &[u32]) {
        let samples = downsample(series, GRAPH_MAX_SAMPLES);
        let max = samples.iter().copied().max().unwrap_or(0);
        queue.write_buffer(&self.history_buffer, 0, bytemuck::cast_slice(&samples));
        self.update_params(queue, true, samples.len() as u32, max);
    }

    /// Update render parameters
    pub fn update_params(&self, queue: &Queue, terminal: bool, history_len: u32, history_max: u32) {
        let params = RenderParams {
            grid_width: self.width,
            grid_height: self.height,
            terminal: u32::from(terminal),
            history_len,
            history_max,
            _padding: [0, 0, 0],
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

/// Reduce a series to at most `limit` entries by taking every k-th sample,
/// always keeping the last one so the graph ends at the final population.
fn downsample(series: &[u32], limit: usize) -> Vec<u32> {
    if series.len() <= limit {
        return series.to_vec();
    }
    let stride = series.len().div_ceil(limit);
    let mut samples: Vec<u32> = series.iter().copied().step_by(stride).collect();
    if let Some(&last) = series.last() {
        if samples.last() != Some(&last) {
            if samples.len() < limit {
                samples.push(last);
            } else if let Some(tail) = samples.last_mut() {
                *tail = last;
            }
        }
    }
    samples
}
