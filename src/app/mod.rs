//! Application state and the event/tick dispatch
//!
//! Everything runs on one thread: input events and timer deadlines both
//! funnel through here. `handle_event` routes user input, `advance` ticks
//! whatever is due, and `next_deadline` tells the main loop how long it may
//! sleep. Rendering reads state and writes the hit rects used for click
//! routing on the next event.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crossterm::event::Event;
use rand::rngs::ThreadRng;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::Config;
use crate::effects::timer::{earliest_deadline, Ticker};
use crate::effects::{CounterAnimation, MatrixRain, TypingEffect};
use crate::form::{ContactForm, FieldId, SubmitOutcome};
use crate::input::{self, Action, InputContext};
use crate::mailer::{self, MailSink};
use crate::nav::Navigation;
use crate::notify::{Notifications, ToastId, ToastKind};
use crate::page::{PageLayout, SectionId, HERO_HEIGHT};
use crate::prefs::PreferenceStore;
use crate::theme::{SystemTheme, ThemeController, ThemeMode};
use crate::ui::nav_bar::NavBarRenderer;
use crate::ui::page::{PageContext, PageRenderer};
use crate::ui::status_bar::StatusBarRenderer;
use crate::ui::toasts::{toast_at, ToastsRenderer};
use crate::viewport::Viewport;
use crate::visibility::{
    FireMode, SubscriptionId, VisibilityTracker, DEFAULT_THRESHOLD, EFFECT_THRESHOLD,
};

/// Rows reserved above/below the page (nav bar, status bar)
const CHROME_ROWS: u16 = 2;

/// What a visibility subscription is wired to
#[derive(Debug, Clone, Copy)]
enum EffectTrigger {
    /// Toggle the section's revealed flag
    Reveal(SectionId),
    /// Start the stat counters
    Stats,
    /// Start the skill gauge fills
    Skills,
}

pub struct App {
    config: Config,
    layout: PageLayout,
    prefs: Box<dyn PreferenceStore>,
    themes: ThemeController,
    viewport: Viewport,
    nav: Navigation,
    visibility: VisibilityTracker,
    triggers: HashMap<SubscriptionId, EffectTrigger>,
    typing: TypingEffect,
    rain: MatrixRain,
    /// One counter per stat, created on first Stats visibility; stats whose
    /// text doesn't parse never get one
    stat_counters: Vec<Option<CounterAnimation>>,
    /// One counter per skill gauge, target = skill level
    skill_counters: Vec<Option<CounterAnimation>>,
    revealed: HashSet<SectionId>,
    notifications: Notifications,
    form: ContactForm,
    form_focus: Option<FieldId>,
    mail_sink: Box<dyn MailSink>,
    resize_debounce: Ticker,
    rng: ThreadRng,
    nav_rects: Vec<(SectionId, Rect)>,
    toast_rects: Vec<(ToastId, Rect)>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        prefs: Box<dyn PreferenceStore>,
        system: &dyn SystemTheme,
        mail_sink: Box<dyn MailSink>,
        width: u16,
        height: u16,
        now: Instant,
    ) -> Self {
        let themes = ThemeController::initialize(prefs.as_ref(), system);
        let layout = PageLayout::compute(&config);
        let nav = Navigation::new(&layout);
        let viewport = Viewport::new(width, height.saturating_sub(CHROME_ROWS));

        let mut rng = rand::rng();
        let mut rain = MatrixRain::new(
            config.effects.rain_interval_ms,
            config.effects.rain_reset_probability,
        );
        rain.resize(width, HERO_HEIGHT as u16, &mut rng);

        let mut typing = TypingEffect::new(config.typed_lines.clone());
        if !config.effects.reduced_motion {
            typing.start(now);
            rain.start(now);
        }

        let stat_counters = vec![];
        let skill_counters = vec![];

        let mut app = Self {
            stat_counters,
            skill_counters,
            config,
            layout,
            prefs,
            themes,
            viewport,
            nav,
            visibility: VisibilityTracker::new(),
            triggers: HashMap::new(),
            typing,
            rain,
            revealed: HashSet::new(),
            notifications: Notifications::new(),
            form: ContactForm::new(),
            form_focus: None,
            mail_sink,
            resize_debounce: Ticker::new(),
            rng,
            nav_rects: Vec::new(),
            toast_rects: Vec::new(),
            should_quit: false,
        };
        app.stat_counters = app.config.stats.iter().map(|_| None).collect();
        app.skill_counters = app.config.skills.iter().map(|_| None).collect();
        app.register_subscriptions();
        app.process_visibility(now);
        app
    }

    /// Wire every scroll-dependent effect to the shared tracker
    fn register_subscriptions(&mut self) {
        for span in self.layout.spans() {
            if span.id == SectionId::Hero {
                continue;
            }
            let id = self
                .visibility
                .subscribe_with_leave(span.id, DEFAULT_THRESHOLD, 2);
            self.triggers.insert(id, EffectTrigger::Reveal(span.id));
        }
        if self.layout.span(SectionId::Stats).is_some() {
            let id = self
                .visibility
                .subscribe(SectionId::Stats, FireMode::Once, EFFECT_THRESHOLD, 0);
            self.triggers.insert(id, EffectTrigger::Stats);
        }
        if self.layout.span(SectionId::Skills).is_some() {
            let id = self
                .visibility
                .subscribe(SectionId::Skills, FireMode::Once, EFFECT_THRESHOLD, 0);
            self.triggers.insert(id, EffectTrigger::Skills);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.themes.mode()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn active_section(&self) -> SectionId {
        self.nav.active()
    }

    pub fn revealed(&self) -> &HashSet<SectionId> {
        &self.revealed
    }

    /// Entry point for hosts that can observe an OS light/dark change
    pub fn system_theme_changed(&mut self, mode: ThemeMode) {
        self.themes.system_preference_changed(mode);
    }

    fn input_context(&self) -> InputContext {
        if self.form_focus.is_some() {
            InputContext::Form
        } else {
            InputContext::Page
        }
    }

    /// Route one terminal event
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if let Event::Resize(width, height) = event {
            self.on_resize(*width, *height, now);
            return;
        }
        if let Some(action) = input::translate(event, self.input_context()) {
            self.handle_action(action, now);
        }
    }

    fn on_resize(&mut self, width: u16, height: u16, now: Instant) {
        // The page must track the terminal immediately; only the rain
        // rebuild is debounced
        self.viewport.resize(width, height.saturating_sub(CHROME_ROWS));
        self.resize_debounce
            .arm(now, Duration::from_millis(self.config.effects.resize_debounce_ms));
        self.process_visibility(now);
    }

    fn handle_action(&mut self, action: Action, now: Instant) {
        let total = self.layout.total_height();
        match action {
            Action::Quit => {
                if self.nav.menu_open() {
                    self.nav.close_menu();
                } else {
                    self.should_quit = true;
                }
            }
            Action::ToggleTheme => {
                let mode = self.themes.toggle(self.prefs.as_mut());
                self.notifications
                    .show(format!("Theme: {}", mode.as_str()), ToastKind::Info, now);
            }
            Action::ToggleMenu => self.nav.toggle_menu(),
            Action::NextSection => self.glide_to_section(self.nav.next_section(), now),
            Action::PrevSection => self.glide_to_section(self.nav.prev_section(), now),
            Action::JumpSection(index) => {
                if let Some(id) = self.nav.section_at_index(index) {
                    self.glide_to_section(id, now);
                }
            }
            Action::ScrollUp(rows) => {
                self.viewport.scroll_up(rows);
                self.process_visibility(now);
            }
            Action::ScrollDown(rows) => {
                self.viewport.scroll_down(rows, total);
                self.process_visibility(now);
            }
            Action::PageUp => {
                self.viewport.scroll_up(self.page_step());
                self.process_visibility(now);
            }
            Action::PageDown => {
                self.viewport.scroll_down(self.page_step(), total);
                self.process_visibility(now);
            }
            Action::Home => {
                self.viewport.scroll_to(0, total);
                self.process_visibility(now);
            }
            Action::End => {
                self.viewport.scroll_to(total, total);
                self.process_visibility(now);
            }
            Action::Activate => {
                // Engage the form when the contact section is on screen,
                // otherwise bring it on screen first
                let contact_visible = self
                    .layout
                    .span(SectionId::Contact)
                    .map(|s| s.start < self.viewport.bottom() && s.end() > self.viewport.top)
                    .unwrap_or(false);
                if contact_visible {
                    self.form_focus = Some(FieldId::Name);
                } else {
                    self.glide_to_section(SectionId::Contact, now);
                }
            }
            Action::FocusNextField => self.move_focus(1),
            Action::FocusPrevField => self.move_focus(-1),
            Action::InsertChar(c) => {
                if let Some(field) = self.form_focus {
                    self.form.push_char(field, c);
                }
            }
            Action::Backspace => {
                if let Some(field) = self.form_focus {
                    self.form.pop_char(field);
                }
            }
            Action::Submit => self.submit_form(now),
            Action::LeaveForm => {
                if let Some(field) = self.form_focus.take() {
                    let _ = self.form.validate_field(field);
                }
            }
            Action::Click { x, y } => self.handle_click(x, y, now),
        }
    }

    fn page_step(&self) -> usize {
        self.viewport.visible_rows().saturating_sub(2).max(1)
    }

    fn glide_to_section(&mut self, id: SectionId, now: Instant) {
        self.nav.close_menu();
        if let Some(span) = self.layout.span(id) {
            self.viewport
                .glide_to(span.start, self.layout.total_height(), now);
        }
    }

    /// Move form focus, validating the field being left (blur validation)
    fn move_focus(&mut self, delta: isize) {
        let Some(current) = self.form_focus else {
            return;
        };
        let _ = self.form.validate_field(current);

        let fields = FieldId::ALL;
        let index = fields.iter().position(|&f| f == current).unwrap_or(0) as isize;
        let next = (index + delta).rem_euclid(fields.len() as isize);
        self.form_focus = Some(fields[next as usize]);
    }

    fn submit_form(&mut self, now: Instant) {
        match self.form.submit(now) {
            SubmitOutcome::Invalid => {
                self.notifications.show(
                    "Please fix the errors in the form",
                    ToastKind::Error,
                    now,
                );
            }
            SubmitOutcome::Started | SubmitOutcome::Busy => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16, now: Instant) {
        if let Some(toast) = toast_at(&self.toast_rects, x, y) {
            self.notifications.dismiss(toast, now);
            return;
        }
        let hit = self
            .nav_rects
            .iter()
            .find(|(_, rect)| rect.contains(ratatui::layout::Position::new(x, y)))
            .map(|(id, _)| *id);
        if let Some(id) = hit {
            self.glide_to_section(id, now);
        }
    }

    /// Re-derive the active nav entry and deliver visibility crossings
    fn process_visibility(&mut self, now: Instant) {
        self.nav.sync_active(&self.layout, &self.viewport);

        for event in self.visibility.evaluate(&self.layout, &self.viewport) {
            match self.triggers.get(&event.id).copied() {
                Some(EffectTrigger::Reveal(section)) => {
                    if event.entered {
                        self.revealed.insert(section);
                    } else {
                        self.revealed.remove(&section);
                    }
                }
                Some(EffectTrigger::Stats) => {
                    for (stat, slot) in self.config.stats.iter().zip(&mut self.stat_counters) {
                        *slot = CounterAnimation::start(&stat.value, now);
                    }
                }
                Some(EffectTrigger::Skills) => {
                    for (skill, slot) in self.config.skills.iter().zip(&mut self.skill_counters) {
                        *slot = CounterAnimation::start(&skill.level.to_string(), now);
                    }
                }
                None => {}
            }
        }
    }

    /// Advance every timer-driven piece that is due at `now`
    pub fn advance(&mut self, now: Instant) {
        self.typing.tick(now);
        self.rain.tick(now, &mut self.rng);

        let was_gliding = self.viewport.is_gliding();
        self.viewport.tick(now);
        if was_gliding {
            self.process_visibility(now);
        }

        self.notifications.tick(now);

        if self.resize_debounce.fire(now) {
            self.rain
                .resize(self.viewport.width, HERO_HEIGHT as u16, &mut self.rng);
        }

        for counter in self
            .stat_counters
            .iter_mut()
            .chain(self.skill_counters.iter_mut())
            .flatten()
        {
            counter.tick(now);
        }

        if let Some(mail) = self.form.tick(now) {
            let url = mailer::compose_mailto(&self.config.contact, &mail);
            self.mail_sink.deliver(&url);
            self.notifications.show(
                "Message sent! Your mail client should open shortly.",
                ToastKind::Success,
                now,
            );
            self.form_focus = None;
        }
    }

    /// The soonest pending deadline across every component, bounding how
    /// long the main loop may sleep
    pub fn next_deadline(&self) -> Option<Instant> {
        let counters = self
            .stat_counters
            .iter()
            .chain(self.skill_counters.iter())
            .flatten()
            .map(|c| c.next_deadline());

        earliest_deadline(
            [
                self.typing.next_deadline(),
                self.rain.next_deadline(),
                self.viewport.next_deadline(),
                self.notifications.next_deadline(),
                self.form.next_deadline(),
                self.resize_debounce.deadline(),
            ]
            .into_iter()
            .chain(counters),
        )
    }

    /// Current gauge fill per skill
    fn skill_fill(&self) -> Vec<f64> {
        self.skill_counters
            .iter()
            .map(|c| c.as_ref().map(|c| c.value()).unwrap_or(0.0))
            .collect()
    }

    /// Current display text per stat (authored text until the counter runs)
    fn stat_values(&self) -> Vec<String> {
        self.config
            .stats
            .iter()
            .zip(&self.stat_counters)
            .map(|(stat, counter)| match counter {
                Some(c) => c.display().to_string(),
                None => stat.value.clone(),
            })
            .collect()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let theme = self.themes.theme().clone();
        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background).fg(theme.foreground)),
            frame.area(),
        );

        let skill_fill = self.skill_fill();
        let stat_values = self.stat_values();
        let typed: String = if self.config.effects.reduced_motion {
            self.config.typed_lines.first().cloned().unwrap_or_default()
        } else {
            self.typing.display().to_string()
        };

        let ctx = PageContext {
            config: &self.config,
            layout: &self.layout,
            viewport: &self.viewport,
            theme: &theme,
            typed: &typed,
            rain: &self.rain,
            revealed: &self.revealed,
            skill_fill: &skill_fill,
            stat_values: &stat_values,
            form: &self.form,
            form_focus: self.form_focus,
        };
        PageRenderer::render(frame, areas[1], &ctx);

        self.nav_rects = NavBarRenderer::render(frame, areas[0], &self.nav, &theme);
        self.toast_rects = ToastsRenderer::render(frame, areas[1], &self.notifications, &theme);
        StatusBarRenderer::render(
            frame,
            areas[2],
            &self.nav,
            self.themes.mode(),
            &theme,
            self.form_focus.is_some(),
        );
    }
}
