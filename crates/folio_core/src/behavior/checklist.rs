//! Checklist toggling, progress readout and celebration effects.
//!
//! # Responsibility
//! - Toggle checklist items from bubbled clicks.
//! - Maintain the floating progress readout, including the completion
//!   state and its two-beat pulse.
//! - Spawn and animate particle bursts when an item becomes checked.
//! - Lift project links on hover.
//!
//! # Invariants
//! - Items toggle independently; toggling twice restores the exact state.
//! - The readout is created at most once and never removed afterwards;
//!   at zero checked items it hides via opacity only.
//! - Completion styling is never reverted by later unchecking.
//! - Bursts are fire-and-forget: they never touch checked state or the
//!   readout, and every particle is removed when its burst expires.

use crate::behavior::{PageScheduler, PulsePhase, TimerAction};
use crate::model::element::{Element, ElementId};
use crate::model::page::Page;
use crate::query::{self, Selector};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

pub const CLASS_TODO_ITEM: &str = "todo-item";
pub const CLASS_CHECKED: &str = "checked";
pub const CLASS_PROGRESS_BAR: &str = "progress-bar";
pub const CLASS_PROJECT_LINK: &str = "project-link";

/// Readout text once every goal is checked.
pub const PROGRESS_COMPLETE_TEXT: &str = "🎯 Ready to Build!";

pub const PARTICLE_COUNT: usize = 8;
pub const PARTICLE_LIFETIME_MS: u64 = 800;

/// Radial distance multiplier over a particle's lifetime.
const PARTICLE_TRAVEL_PX: f64 = 40.0;
/// Upward bias subtracted quadratically, giving the burst its arc.
const PARTICLE_LIFT_PX: f64 = 80.0;

const PULSE_EXPAND_DELAY_MS: u64 = 100;
const PULSE_SETTLE_DELAY_MS: u64 = 300;
const PULSE_EXPAND_TRANSFORM: &str = "translateX(-50%) scale(1.1)";
const PULSE_SETTLE_TRANSFORM: &str = "translateX(-50%) scale(1)";

const HOVER_LIFT_TRANSFORM: &str = "translateY(-1px)";

const STYLE_TRANSFORM: &str = "transform";
const STYLE_OPACITY: &str = "opacity";

const PROGRESS_BAR_CSS: &str = "
    position: fixed;
    bottom: 30px;
    left: 50%;
    transform: translateX(-50%);
    padding: 0.75rem 1.5rem;
    background: var(--bg-primary);
    border: 2px solid var(--border-color);
    border-radius: 25px;
    box-shadow: var(--shadow-lg);
    font-weight: 600;
    color: var(--text-primary);
    z-index: 100;
    transition: all 0.3s ease;
    font-size: 0.9rem;
";

static TODO_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".todo-item").expect("valid todo selector"));
static CHECKED_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".todo-item.checked").expect("valid checked selector"));
static PROGRESS_BAR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".progress-bar").expect("valid progress bar selector"));

/// Checklist state: the burst animations in flight and their RNG.
///
/// Checked state itself lives in element classes; this struct only holds
/// what cannot be read back from the page.
#[derive(Debug)]
pub struct ChecklistInteractions {
    rng: StdRng,
    bursts: Vec<ParticleBurst>,
}

#[derive(Debug)]
struct ParticleBurst {
    started_at_ms: u64,
    particles: Vec<Particle>,
}

#[derive(Debug)]
struct Particle {
    element: ElementId,
    angle: f64,
    velocity: f64,
}

impl ChecklistInteractions {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            bursts: Vec::new(),
        }
    }

    /// Fixed-seed variant for reproducible particle colors and speeds.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bursts: Vec::new(),
        }
    }

    /// Toggles the checklist item on the click's bubble path, celebrating
    /// a fresh check and recomputing the progress readout either way.
    pub fn handle_click(
        &mut self,
        page: &mut Page,
        scheduler: &mut PageScheduler,
        target: ElementId,
    ) {
        let path = page.ancestors_inclusive(target);
        let Some(item) = path.into_iter().find(|id| {
            page.element(*id)
                .is_some_and(|el| el.has_class(CLASS_TODO_ITEM))
        }) else {
            return;
        };

        let now_checked = page
            .element_mut(item)
            .map(|el| el.toggle_class(CLASS_CHECKED))
            .unwrap_or(false);
        log::debug!("event=todo_toggle module=checklist element={item} checked={now_checked}");

        if now_checked {
            self.celebrate(page, item, scheduler.now_ms());
        }
        self.update_progress(page, scheduler);
    }

    /// Lifts a project link under the pointer.
    pub fn handle_mouse_enter(&self, page: &mut Page, target: ElementId) {
        if let Some(el) = page.element_mut(target) {
            if el.has_class(CLASS_PROJECT_LINK) {
                el.style_mut()
                    .set_property(STYLE_TRANSFORM, HOVER_LIFT_TRANSFORM);
            }
        }
    }

    /// Settles a project link when the pointer leaves.
    pub fn handle_mouse_leave(&self, page: &mut Page, target: ElementId) {
        if let Some(el) = page.element_mut(target) {
            if el.has_class(CLASS_PROJECT_LINK) {
                el.style_mut().remove_property(STYLE_TRANSFORM);
            }
        }
    }

    /// Applies one beat of the completion pulse to the readout.
    pub fn apply_pulse(&self, page: &mut Page, phase: PulsePhase) {
        let Some(bar) = query::select_first(page, &PROGRESS_BAR) else {
            return;
        };
        let transform = match phase {
            PulsePhase::Expand => PULSE_EXPAND_TRANSFORM,
            PulsePhase::Settle => PULSE_SETTLE_TRANSFORM,
        };
        if let Some(el) = page.element_mut(bar) {
            el.style_mut().set_property(STYLE_TRANSFORM, transform);
        }
    }

    /// Advances every burst in flight; expired bursts remove their
    /// particles from the page.
    pub fn on_frame(&mut self, page: &mut Page, now_ms: u64) {
        let mut expired = 0usize;
        self.bursts.retain(|burst| {
            let elapsed = now_ms.saturating_sub(burst.started_at_ms);
            let progress = elapsed as f64 / PARTICLE_LIFETIME_MS as f64;
            if progress >= 1.0 {
                for particle in &burst.particles {
                    page.remove(particle.element);
                }
                expired += 1;
                return false;
            }
            for particle in &burst.particles {
                let x = particle.angle.cos() * particle.velocity * progress * PARTICLE_TRAVEL_PX;
                let y = particle.angle.sin() * particle.velocity * progress * PARTICLE_TRAVEL_PX
                    - progress * progress * PARTICLE_LIFT_PX;
                let scale = 1.0 - progress;
                let opacity = 1.0 - progress;
                if let Some(el) = page.element_mut(particle.element) {
                    el.style_mut().set_property(
                        STYLE_TRANSFORM,
                        format!("translate({x}px, {y}px) scale({scale})"),
                    );
                    el.style_mut().set_property(STYLE_OPACITY, format!("{opacity}"));
                }
            }
            true
        });
        if expired > 0 {
            log::debug!("event=burst_expired module=checklist bursts={expired}");
        }
    }

    /// Whether any burst still has frames to play.
    pub fn has_active_bursts(&self) -> bool {
        !self.bursts.is_empty()
    }

    fn celebrate(&mut self, page: &mut Page, item: ElementId, now_ms: u64) {
        let Some(rect) = page.bounding_client_rect(item) else {
            return;
        };
        let (center_x, center_y) = rect.center();
        let body = page.body();

        let mut particles = Vec::with_capacity(PARTICLE_COUNT);
        for index in 0..PARTICLE_COUNT {
            // Draw order matters for seeded reproducibility: color first,
            // then velocity, per particle.
            let color = if self.rng.random::<f64>() > 0.5 {
                "var(--text-primary)"
            } else {
                "var(--accent-color)"
            };
            let velocity = 2.0 + self.rng.random::<f64>() * 2.0;
            let angle = TAU * index as f64 / PARTICLE_COUNT as f64;

            let mut dot = Element::new("div");
            dot.style_mut().apply_css_text(&format!(
                "position: fixed; left: {center_x}px; top: {center_y}px; width: 6px; \
                 height: 6px; background: {color}; border-radius: 50%; \
                 pointer-events: none; z-index: 9999;"
            ));
            let Ok(element) = page.append(body, dot) else {
                continue;
            };
            particles.push(Particle {
                element,
                angle,
                velocity,
            });
        }

        log::debug!(
            "event=burst_spawn module=checklist element={item} particles={}",
            particles.len()
        );
        self.bursts.push(ParticleBurst {
            started_at_ms: now_ms,
            particles,
        });
    }

    fn update_progress(&mut self, page: &mut Page, scheduler: &mut PageScheduler) {
        let total = query::select(page, &TODO_ITEMS).len();
        if total == 0 {
            return;
        }
        let checked = query::select(page, &CHECKED_ITEMS).len();
        let percentage = checked as f64 / total as f64 * 100.0;

        let mut bar = query::select_first(page, &PROGRESS_BAR);
        if bar.is_none() && checked > 0 {
            let mut readout = Element::new("div").with_class(CLASS_PROGRESS_BAR);
            readout.style_mut().apply_css_text(PROGRESS_BAR_CSS);
            let body = page.body();
            bar = page.append(body, readout).ok();
            log::debug!("event=progress_readout_created module=checklist");
        }
        let Some(bar) = bar else {
            return;
        };

        if let Some(el) = page.element_mut(bar) {
            el.set_text(format!("{checked}/{total} Goals Set"));
            el.style_mut()
                .set_property(STYLE_OPACITY, if checked > 0 { "1" } else { "0" });
        }
        log::debug!(
            "event=progress module=checklist checked={checked} total={total} percentage={percentage:.1}"
        );

        if checked == total {
            if let Some(el) = page.element_mut(bar) {
                el.style_mut().set_property("background", "var(--text-primary)");
                el.style_mut().set_property("color", "var(--bg-primary)");
                el.style_mut()
                    .set_property("border-color", "var(--text-primary)");
                el.set_text(PROGRESS_COMPLETE_TEXT);
            }
            scheduler.schedule_timer(
                PULSE_EXPAND_DELAY_MS,
                TimerAction::ProgressPulse(PulsePhase::Expand),
            );
            scheduler.schedule_timer(
                PULSE_SETTLE_DELAY_MS,
                TimerAction::ProgressPulse(PulsePhase::Settle),
            );
            log::info!("event=goals_complete module=checklist total={total}");
        }
    }
}

impl Default for ChecklistInteractions {
    fn default() -> Self {
        Self::new()
    }
}
