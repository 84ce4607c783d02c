//! Page controller.
//!
//! # Responsibility
//! - Own the page, the scheduler and the four behavior families.
//! - Route embedder events to every interested family.
//! - Drive the logical clock: fire due timers and render frames in strict
//!   time order.
//!
//! # Invariants
//! - `start` runs at most once; events dispatched before it are dropped
//!   and advance merely moves the clock.
//! - Within one instant, timers fire before the frame renders.
//! - Frames render only when frame work is pending: a coalesced task or a
//!   running animation.
//!
//! # See also
//! - [`crate::behavior`] for the per-family semantics.

use crate::behavior::checklist::ChecklistInteractions;
use crate::behavior::fade::FadeAnimator;
use crate::behavior::menu::MobileMenu;
use crate::behavior::nav::NavHighlighter;
use crate::behavior::{FrameTask, PageScheduler, TimerAction};
use crate::event::PageEvent;
use crate::model::element::Viewport;
use crate::model::page::Page;
use crate::schedule::{Scheduler, DEFAULT_FRAME_INTERVAL_MS};

/// Runtime knobs; everything else about the page is compiled in.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Spacing of the frame grid in logical milliseconds.
    pub frame_interval_ms: u64,
    /// Fixed RNG seed for reproducible particle bursts.
    pub rng_seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            rng_seed: None,
        }
    }
}

/// Single owner of all interaction state for one page.
#[derive(Debug)]
pub struct PageController {
    page: Page,
    scheduler: PageScheduler,
    fade: FadeAnimator,
    nav: NavHighlighter,
    menu: MobileMenu,
    checklist: ChecklistInteractions,
    started: bool,
}

impl PageController {
    pub fn new(page: Page) -> Self {
        Self::with_config(page, ControllerConfig::default())
    }

    pub fn with_config(page: Page, config: ControllerConfig) -> Self {
        let checklist = match config.rng_seed {
            Some(seed) => ChecklistInteractions::with_seed(seed),
            None => ChecklistInteractions::new(),
        };
        Self {
            page,
            scheduler: Scheduler::with_frame_interval(config.frame_interval_ms),
            fade: FadeAnimator::new(),
            nav: NavHighlighter::new(),
            menu: MobileMenu::new(),
            checklist,
            started: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Direct page access for embedders and tests.
    ///
    /// Behavior state (open menu, checked items, reveals) lives in element
    /// classes, so out-of-band structural edits are visible to the
    /// families on their next dispatch.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether any typewriter or burst still wants frames.
    pub fn animations_running(&self) -> bool {
        self.fade.is_typing() || self.checklist.has_active_bursts()
    }

    /// Runs every family's initialization once: fade tagging and the
    /// initial visibility sweep, the initial nav highlight, and the menu
    /// construction.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let viewport = self.page.viewport();
        log::info!(
            "event=controller_start module=controller viewport={}x{} mobile={}",
            viewport.width,
            viewport.height,
            viewport.is_mobile()
        );
        self.fade.start(&mut self.page, &mut self.scheduler);
        self.fade.sweep(&self.page, &mut self.scheduler);
        self.nav.recompute(&mut self.page);
        self.menu.start(&mut self.page);
    }

    /// Applies one embedder event and routes it to every interested
    /// family.
    ///
    /// Events arriving before `start` are dropped, the same way a page
    /// without attached listeners ignores them. Click routing order is
    /// checklist, nav, menu; the families act on disjoint elements except
    /// for in-menu anchors, which nav and menu both handle on purpose.
    pub fn dispatch(&mut self, event: PageEvent) {
        if !self.started {
            return;
        }
        match event {
            PageEvent::Scroll { top } => {
                self.page.set_scroll_y(top);
                self.after_scroll_moved();
            }
            PageEvent::Resize { width, height } => {
                self.page.set_viewport(Viewport::new(width, height));
                self.menu.check_screen_size(&mut self.page);
                self.fade.sweep(&self.page, &mut self.scheduler);
            }
            PageEvent::VisibilityChange { hidden } => {
                self.page.set_hidden(hidden);
                self.fade.set_playback(&mut self.page, hidden);
            }
            PageEvent::Click { target } => {
                self.checklist
                    .handle_click(&mut self.page, &mut self.scheduler, target);
                if self.nav.handle_anchor_click(&mut self.page, target) {
                    self.menu.dismiss(&mut self.page);
                    self.after_scroll_moved();
                }
                self.menu
                    .handle_click(&mut self.page, &mut self.scheduler, target);
            }
            PageEvent::MouseEnter { target } => {
                self.checklist.handle_mouse_enter(&mut self.page, target);
            }
            PageEvent::MouseLeave { target } => {
                self.checklist.handle_mouse_leave(&mut self.page, target);
            }
        }
    }

    /// Drives the clock forward by `dt_ms`, interleaving due timers and
    /// rendered frames in time order.
    pub fn advance(&mut self, dt_ms: u64) {
        let target_ms = self.scheduler.now_ms() + dt_ms;
        loop {
            let next_timer = self
                .scheduler
                .next_timer_due()
                .filter(|due| *due <= target_ms);
            let next_frame = if self.frame_work_pending() {
                Some(self.scheduler.next_frame_at()).filter(|at| *at <= target_ms)
            } else {
                None
            };
            let next = match (next_timer, next_frame) {
                (Some(timer), Some(frame)) => timer.min(frame),
                (Some(timer), None) => timer,
                (None, Some(frame)) => frame,
                (None, None) => break,
            };

            self.scheduler.advance_clock_to(next);
            for action in self.scheduler.take_due_timers() {
                self.apply_timer_action(action);
            }
            if next_frame == Some(next) {
                self.run_frame();
            }
        }
        self.scheduler.advance_clock_to(target_ms);
    }

    fn after_scroll_moved(&mut self) {
        self.fade.sweep(&self.page, &mut self.scheduler);
        self.scheduler.request_frame_task(FrameTask::HighlightNav);
    }

    fn frame_work_pending(&self) -> bool {
        self.scheduler.frame_tasks_pending() || self.animations_running()
    }

    fn run_frame(&mut self) {
        let now_ms = self.scheduler.now_ms();
        for task in self.scheduler.take_frame_tasks() {
            match task {
                FrameTask::HighlightNav => self.nav.recompute(&mut self.page),
            }
        }
        self.fade.on_frame(&mut self.page, now_ms);
        self.checklist.on_frame(&mut self.page, now_ms);
    }

    fn apply_timer_action(&mut self, action: TimerAction) {
        match action {
            TimerAction::RevealElement(id) => self.fade.reveal(&mut self.page, id),
            TimerAction::StartTypewriter => {
                let now_ms = self.scheduler.now_ms();
                self.fade.start_typewriter(&mut self.page, now_ms);
            }
            TimerAction::CloseMobileMenu => self.menu.close(&mut self.page),
            TimerAction::ProgressPulse(phase) => self.checklist.apply_pulse(&mut self.page, phase),
        }
    }
}
