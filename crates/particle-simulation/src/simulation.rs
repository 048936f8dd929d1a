//! The update → render loop driving one backdrop
//!
//! Each loop owns its field, pointer, surface and scheduler, so several
//! backdrops can run side by side without sharing anything.

use std::time::Instant;

use particle_physics::{Bounds, ParticleField, PointerTracker};
use particle_renderer::{DrawingSurface, ProximityRenderer, RenderStats};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::StepClock;
use crate::events::HostEvent;
use crate::params::SimulationParams;
use crate::resize::ResizeCoordinator;
use crate::scheduler::{FrameHandle, FrameScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Stopped,
    Running { pending: Option<FrameHandle> },
}

pub struct SimulationLoop<S, F> {
    params: SimulationParams,
    surface: Option<S>,
    scheduler: F,
    field: ParticleField,
    pointer: PointerTracker,
    resize: ResizeCoordinator,
    renderer: ProximityRenderer,
    clock: StepClock,
    rng: StdRng,
    state: LoopState,
    ticks: u64,
    last_stats: RenderStats,
}

impl<S: DrawingSurface, F: FrameScheduler> SimulationLoop<S, F> {
    /// Build a stopped loop. A `None` surface is allowed and turns every
    /// operation that needs one into a no-op.
    pub fn new(params: SimulationParams, surface: Option<S>, scheduler: F) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            surface,
            scheduler,
            field: ParticleField::new(params.spawn),
            pointer: PointerTracker::new(),
            resize: ResizeCoordinator::new(params.resize_debounce),
            renderer: ProximityRenderer::new(params.links),
            clock: StepClock::new(params.ticks_per_second),
            rng,
            state: LoopState::Stopped,
            ticks: 0,
            last_stats: RenderStats::default(),
            params,
        }
    }

    /// Populate the field for the surface and request the first frame.
    /// Does nothing when already running or when there is no surface.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let Some(surface) = self.surface.as_ref() else {
            log::debug!("No drawing surface, particle backdrop stays off");
            return;
        };

        let bounds = surface.size();
        self.field.populate(bounds, &mut self.rng);
        self.clock.reset();

        let handle = self.scheduler.schedule();
        self.state = LoopState::Running {
            pending: Some(handle),
        };

        log::info!(
            "Particle backdrop started: {} particles on {}x{}",
            self.field.len(),
            bounds.width,
            bounds.height
        );
    }

    /// Cancel the outstanding frame; no tick runs after this returns
    pub fn stop(&mut self) {
        let LoopState::Running { pending } = self.state else {
            return;
        };

        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
        self.state = LoopState::Stopped;

        log::info!("Particle backdrop stopped after {} ticks", self.ticks);
    }

    pub fn handle_event(&mut self, event: HostEvent, now: Instant) {
        match event {
            HostEvent::PointerMoved { x, y } => self.pointer.on_pointer_move(x, y),
            HostEvent::Resized { width, height } => {
                self.resize.notify_resize(Bounds::new(width, height), now);
                // Zero debounce applies right away
                self.poll_resize(now);
            }
        }
    }

    /// Apply a resize whose quiet period is over. Returns whether one was applied.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        let Some(viewport) = self.resize.poll(now) else {
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        surface.resize(viewport.width, viewport.height);
        self.field.populate(viewport, &mut self.rng);

        log::info!(
            "Surface resized to {}x{}, {} particles",
            viewport.width,
            viewport.height,
            self.field.len()
        );
        true
    }

    /// Run the frame identified by `handle`: update, render, request the next
    /// frame. Returns `false` and does nothing if `handle` is not the pending
    /// frame of a running loop.
    pub fn tick(&mut self, handle: FrameHandle, now: Instant) -> bool {
        match self.state {
            LoopState::Running { pending: Some(pending) } if pending == handle => {}
            _ => {
                log::trace!("Ignoring stale frame {}", handle.id());
                return false;
            }
        }
        self.state = LoopState::Running { pending: None };

        self.poll_resize(now);

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        for _ in 0..self.clock.steps(now) {
            self.field.update(&self.pointer, &self.params.attraction);
        }
        self.last_stats = self.renderer.render(surface, &self.field);
        self.ticks += 1;

        if self.params.stats_interval > 0 && self.ticks % self.params.stats_interval == 0 {
            log::debug!(
                "Tick {}: {} particles, {} links",
                self.ticks,
                self.last_stats.particles,
                self.last_stats.links
            );
        }

        let next = self.scheduler.schedule();
        self.state = LoopState::Running {
            pending: Some(next),
        };
        true
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Completed ticks since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    /// When a debounced resize is due, if one is pending
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }
}
