//! Fade-in reveals and the intro typewriter.
//!
//! # Responsibility
//! - Tag fade targets, watch their visibility and reveal them once.
//! - Force-reveal the intro block on narrow viewports.
//! - Type the intro subtitle character by character on wide viewports.
//! - Pause and resume CSS animation playback with tab visibility.
//!
//! # Invariants
//! - `visible` is only ever added, never removed.
//! - The typewriter runs at most once per page; hiding the tab does not
//!   stop it.
//! - A reveal timer whose element is gone applies as a no-op.

use crate::behavior::{PageScheduler, TimerAction};
use crate::model::element::ElementId;
use crate::model::page::Page;
use crate::observe::IntersectionWatcher;
use crate::query::{self, Selector};
use once_cell::sync::Lazy;

/// Elements that participate in scroll-triggered reveals.
pub const FADE_TARGET_SELECTOR: &str =
    ".intro-content, .skill-card, .todo-item, .section-title, .section-subtitle";

pub const CLASS_FADE_IN_ELEMENT: &str = "fade-in-element";
pub const CLASS_VISIBLE: &str = "visible";

/// Stagger between an element becoming visible enough and its reveal.
pub const REVEAL_DELAY_MS: u64 = 100;

/// Pause before the subtitle starts typing.
pub const TYPEWRITER_START_DELAY_MS: u64 = 500;

/// Cadence of one typed character.
pub const TYPEWRITER_CHAR_INTERVAL_MS: u64 = 30;

const STYLE_ANIMATION_PLAY_STATE: &str = "animation-play-state";
const PLAY_STATE_PAUSED: &str = "paused";
const PLAY_STATE_RUNNING: &str = "running";

static FADE_TARGETS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(FADE_TARGET_SELECTOR).expect("valid fade target selector"));
static FADE_TAGGED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".fade-in-element").expect("valid fade tag selector"));
static INTRO_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".intro-content").expect("valid intro selector"));
static INTRO_SUBTITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".intro-subtitle").expect("valid subtitle selector"));

/// Scroll-reveal and typewriter state for one page.
#[derive(Debug, Default)]
pub struct FadeAnimator {
    watcher: IntersectionWatcher,
    pending_typewriter: Option<PendingTypewriter>,
    typewriter: Option<Typewriter>,
}

#[derive(Debug)]
struct PendingTypewriter {
    target: ElementId,
    chars: Vec<char>,
}

#[derive(Debug)]
struct Typewriter {
    target: ElementId,
    chars: Vec<char>,
    typed: usize,
    next_char_at_ms: u64,
}

impl Typewriter {
    /// Types every character that has come due by `now_ms`.
    fn step(&mut self, page: &mut Page, now_ms: u64) {
        while self.typed < self.chars.len() && self.next_char_at_ms <= now_ms {
            let Some(el) = page.element_mut(self.target) else {
                self.typed = self.chars.len();
                return;
            };
            el.append_text(self.chars[self.typed]);
            self.typed += 1;
            self.next_char_at_ms += TYPEWRITER_CHAR_INTERVAL_MS;
        }
    }

    fn is_done(&self) -> bool {
        self.typed >= self.chars.len()
    }
}

impl FadeAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags and observes every fade target, arms the narrow-viewport intro
    /// reveal and captures the subtitle for typing on wide viewports.
    pub fn start(&mut self, page: &mut Page, scheduler: &mut PageScheduler) {
        let targets = query::select(page, &FADE_TARGETS);
        for id in &targets {
            if let Some(el) = page.element_mut(*id) {
                el.add_class(CLASS_FADE_IN_ELEMENT);
            }
            self.watcher.observe(*id);
        }
        log::info!("event=fade_armed module=fade targets={}", targets.len());

        if page.viewport().is_mobile() {
            if let Some(intro) = query::select_first(page, &INTRO_CONTENT) {
                scheduler.schedule_timer(REVEAL_DELAY_MS, TimerAction::RevealElement(intro));
            }
        } else if let Some(subtitle) = query::select_first(page, &INTRO_SUBTITLE) {
            let captured = page
                .element(subtitle)
                .map(|el| el.text().to_string())
                .unwrap_or_default();
            if let Some(el) = page.element_mut(subtitle) {
                el.set_text("");
            }
            log::debug!(
                "event=typewriter_armed module=fade element={subtitle} length={}",
                captured.chars().count()
            );
            self.pending_typewriter = Some(PendingTypewriter {
                target: subtitle,
                chars: captured.chars().collect(),
            });
            scheduler.schedule_timer(TYPEWRITER_START_DELAY_MS, TimerAction::StartTypewriter);
        }
    }

    /// Re-evaluates watched elements and schedules reveals for those that
    /// cleared the visibility threshold.
    pub fn sweep(&mut self, page: &Page, scheduler: &mut PageScheduler) {
        for id in self.watcher.sweep(page) {
            scheduler.schedule_timer(REVEAL_DELAY_MS, TimerAction::RevealElement(id));
            log::debug!("event=reveal_scheduled module=fade element={id}");
        }
    }

    /// Applies a due reveal. Gone or already revealed elements are skipped.
    pub fn reveal(&self, page: &mut Page, id: ElementId) {
        if let Some(el) = page.element_mut(id) {
            if el.add_class(CLASS_VISIBLE) {
                log::debug!("event=reveal module=fade element={id}");
            }
        }
    }

    /// Begins typing; the first character lands at the current instant.
    pub fn start_typewriter(&mut self, page: &mut Page, now_ms: u64) {
        let Some(pending) = self.pending_typewriter.take() else {
            return;
        };
        let mut machine = Typewriter {
            target: pending.target,
            chars: pending.chars,
            typed: 0,
            next_char_at_ms: now_ms,
        };
        machine.step(page, now_ms);
        log::debug!(
            "event=typewriter_started module=fade element={} length={}",
            machine.target,
            machine.chars.len()
        );
        if !machine.is_done() {
            self.typewriter = Some(machine);
        }
    }

    /// Advances the typewriter to the current frame instant.
    pub fn on_frame(&mut self, page: &mut Page, now_ms: u64) {
        let Some(machine) = self.typewriter.as_mut() else {
            return;
        };
        machine.step(page, now_ms);
        if machine.is_done() {
            log::debug!("event=typewriter_done module=fade element={}", machine.target);
            self.typewriter = None;
        }
    }

    /// Pauses or resumes CSS animation playback on every tagged element.
    ///
    /// Purely a playback toggle: reveals and running machines are not
    /// rewound or cancelled.
    pub fn set_playback(&self, page: &mut Page, hidden: bool) {
        let state = if hidden {
            PLAY_STATE_PAUSED
        } else {
            PLAY_STATE_RUNNING
        };
        let tagged = query::select(page, &FADE_TAGGED);
        for id in &tagged {
            if let Some(el) = page.element_mut(*id) {
                el.style_mut().set_property(STYLE_ANIMATION_PLAY_STATE, state);
            }
        }
        log::debug!(
            "event=playback module=fade state={state} elements={}",
            tagged.len()
        );
    }

    /// Whether the typewriter still has characters to deliver.
    pub fn is_typing(&self) -> bool {
        self.typewriter.is_some()
    }
}
