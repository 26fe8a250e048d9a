//! Task orchestration
//!
//! [`contour_raster`] owns a run: it allocates the shared state, launches a
//! fixed pool of scoped worker threads and joins them. Every worker walks
//! the same three phases over its own partition, separated by a
//! [`PhaseBarrier`]:
//!
//! 1. rescale output rows (skipped when the source already fits)
//! 2. sample grid rows; task 0 also samples the boundary row
//! 3. stamp grid rows
//!
//! Any failure aborts the barrier, so the remaining tasks stop at their next
//! rendezvous and the run returns an error without producing output.

use crate::barrier::{AbortOnUnwind, PhaseBarrier};
use crate::canvas::SharedCanvas;
use crate::error::{ContourError, ContourResult};
use crate::grid::{Grid, sample_boundary_row, sample_rows};
use crate::options::IsolineOptions;
use crate::partition::partition;
use crate::rescale::rescale_rows;
use crate::stamp::stamp_rows;
use crate::stencil::StencilSet;
use isoline_core::Raster;
use std::path::Path;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Task that samples the grid's boundary row
pub const BOUNDARY_TASK: usize = 0;

/// State shared by all tasks for the lifetime of one run.
struct RunState<'a> {
    /// Source to resample from; `None` when it became the canvas itself
    source: Option<Raster>,
    canvas: SharedCanvas,
    grid: Grid,
    stencils: &'a StencilSet,
    options: IsolineOptions,
    barrier: PhaseBarrier,
}

/// One worker's identity within the pool.
#[derive(Debug, Clone, Copy)]
struct Task {
    id: usize,
    total: usize,
}

impl Task {
    fn run(self, state: &RunState<'_>) -> ContourResult<()> {
        let _guard = AbortOnUnwind(&state.barrier);
        let result = self.run_phases(state);
        if result.is_err() {
            state.barrier.abort();
        }
        result
    }

    fn run_phases(self, state: &RunState<'_>) -> ContourResult<()> {
        let opts = &state.options;

        if let Some(source) = &state.source {
            let rows = partition(self.id, self.total, state.canvas.height() as usize);
            debug!(task = self.id, ?rows, "rescale");
            rescale_rows(source, &state.canvas, rows)?;
        }
        state.barrier.wait()?;

        let rows = partition(self.id, self.total, state.grid.rows());
        debug!(task = self.id, ?rows, "sample");
        sample_rows(
            &state.canvas,
            &state.grid,
            rows.clone(),
            opts.step_x,
            opts.step_y,
            opts.threshold,
        );
        if self.id == BOUNDARY_TASK {
            sample_boundary_row(&state.canvas, &state.grid, opts.step_x, opts.threshold);
        }
        state.barrier.wait()?;

        debug!(task = self.id, ?rows, "stamp");
        stamp_rows(
            &state.canvas,
            &state.grid,
            state.stencils,
            rows,
            opts.step_x,
            opts.step_y,
        );
        state.barrier.wait()?;

        Ok(())
    }
}

/// Launch `tasks` workers over `state` and wait for all of them.
fn run_tasks(state: &RunState<'_>, tasks: usize) -> ContourResult<()> {
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(tasks);
        for id in 0..tasks {
            let task = Task { id, total: tasks };
            let spawned = thread::Builder::new()
                .name(format!("isoline-{id}"))
                .spawn_scoped(s, move || task.run(state));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    state.barrier.abort();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(ContourError::TaskLaunch { task: id, source });
                }
            }
        }

        let mut failure: Option<ContourError> = None;
        for (id, handle) in handles.into_iter().enumerate() {
            let outcome = handle.join().unwrap_or(Err(ContourError::TaskJoin(id)));
            if let Err(e) = outcome {
                // report the root cause, not the tasks it released
                if failure
                    .as_ref()
                    .is_none_or(|f| matches!(f, ContourError::BarrierAborted))
                {
                    failure = Some(e);
                }
            }
        }
        failure.map_or(Ok(()), Err)
    })
}

/// Replace `source` by its contour overlay.
///
/// The result has the working resolution `(rescale_width, rescale_height)`,
/// or the source's own resolution when the source already fits inside it.
/// Identical inputs give identical output for every task count.
///
/// # Errors
///
/// - [`ContourError::InvalidTaskCount`] if `tasks == 0`
/// - [`ContourError::InvalidStep`] / [`ContourError::StencilSize`] if the
///   options and stencils disagree
/// - [`ContourError::Core`] if shared state cannot be allocated
/// - [`ContourError::TaskLaunch`] / [`ContourError::TaskJoin`] if the worker
///   pool fails
pub fn contour_raster(
    source: Raster,
    stencils: &StencilSet,
    options: &IsolineOptions,
    tasks: usize,
) -> ContourResult<Raster> {
    if tasks == 0 {
        return Err(ContourError::InvalidTaskCount(tasks));
    }
    options.validate()?;
    stencils.check_cell_size(options.step_x, options.step_y)?;

    let start = Instant::now();
    let (src_w, src_h) = (source.width(), source.height());
    let (canvas, source) = if source.fits_within(options.rescale_width, options.rescale_height) {
        (SharedCanvas::from_raster_mut(source.into_mut()), None)
    } else {
        (
            SharedCanvas::new(options.rescale_width, options.rescale_height)?,
            Some(source),
        )
    };
    let grid = Grid::for_raster(canvas.width(), canvas.height(), options.step_x, options.step_y)?;
    info!(
        source = %format!("{src_w}x{src_h}"),
        working = %format!("{}x{}", canvas.width(), canvas.height()),
        rescale = source.is_some(),
        grid = %format!("{}x{}", grid.rows() + 1, grid.cols() + 1),
        tasks,
        "starting contour run"
    );

    let state = RunState {
        source,
        canvas,
        grid,
        stencils,
        options: *options,
        barrier: PhaseBarrier::new(tasks),
    };
    run_tasks(&state, tasks)?;

    let output = state.canvas.into_raster()?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "contour run finished");
    Ok(output)
}

/// Read `input`, contour it with the stencils in `stencil_dir`, and write
/// the result to `output` (format chosen by extension).
///
/// Nothing is written unless the whole run succeeds.
pub fn run<P, Q, R>(
    input: P,
    output: Q,
    stencil_dir: R,
    options: &IsolineOptions,
    tasks: usize,
) -> ContourResult<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    if tasks == 0 {
        return Err(ContourError::InvalidTaskCount(tasks));
    }
    let source = isoline_io::read_raster(&input)?;
    info!(path = %input.as_ref().display(), "read input");
    let stencils = StencilSet::load(&stencil_dir)?;

    let result = contour_raster(source, &stencils, options, tasks)?;

    isoline_io::write_raster_auto(&result, &output)?;
    info!(path = %output.as_ref().display(), "wrote output");
    Ok(())
}
