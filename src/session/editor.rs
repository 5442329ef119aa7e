use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
    path::PathBuf,
    sync::mpsc::{Receiver, Sender, TryRecvError, channel},
};

use crate::{
    assets::{
        decode::{self, PreparedImage},
        text::TextLayoutEngine,
    },
    composition::{history::ColorHistory, model::CompositionState},
    foundation::{
        core::{Canvas, Rgb8},
        error::{AdError, AdResult},
    },
    render::{backend::FrameRGBA, renderer::AdRenderer},
    session::sampler::{
        ColorTarget, SampleError, SampleOutcome, SampleTicket, SamplerCapability,
    },
};

/// Construction-time settings for an [`EditorSession`].
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Canvas size, fixed for the session.
    pub canvas: Canvas,
    /// Font file for body and CTA text. Falls back to `ADCANVAS_FONT`.
    pub font: Option<PathBuf>,
    /// Host pixel sampler.
    pub sampler: SamplerCapability,
}

/// Handle for an in-flight background image load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageTicket {
    seq: u64,
}

/// Something that happened while draining completed background work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A decoded image replaced the background.
    ImageLoaded {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
    /// Decoding failed; the previous background stays.
    ImageRejected(String),
    /// A newer load superseded this one.
    ImageStale,
    /// A pixel sample resolved.
    Sample(SampleOutcome),
}

/// Result of one [`EditorSession::pump`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Whether a render pass ran.
    pub rendered: bool,
    /// Completions applied or dropped during this pump, in arrival order.
    pub events: Vec<SessionEvent>,
}

enum Completion {
    Image(ImageTicket, AdResult<PreparedImage>),
    Sample(SampleTicket, Result<Rgb8, SampleError>),
}

/// Owns one editing session: composition state, color history, picker visibility and the
/// renderer.
///
/// Setters only mark the session dirty. [`Self::pump`] drains finished background work and
/// then renders at most once against the whole current state, so bursts of edits coalesce.
pub struct EditorSession {
    state: CompositionState,
    history: ColorHistory,
    picker_open: bool,
    renderer: AdRenderer,
    frame: Option<FrameRGBA>,
    dirty: bool,
    render_count: u64,
    cta_revision: u64,
    background_revision: u64,
    image_seq: u64,
    sample_seq: u64,
    sampler: SamplerCapability,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
}

impl EditorSession {
    /// Build a session, resolving the font from `config`.
    pub fn new(config: SessionConfig) -> AdResult<Self> {
        let text = TextLayoutEngine::resolve(config.font.as_deref())?;
        Self::with_renderer(config.canvas, AdRenderer::new(text), config.sampler)
    }

    /// Build a session around an existing renderer.
    pub fn with_renderer(
        canvas: Canvas,
        renderer: AdRenderer,
        sampler: SamplerCapability,
    ) -> AdResult<Self> {
        canvas.validate()?;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            sampler = ?sampler,
            "editor session created"
        );
        let (tx, rx) = channel();
        Ok(Self {
            state: CompositionState::new(canvas),
            history: ColorHistory::new(),
            picker_open: false,
            renderer,
            frame: None,
            dirty: true,
            render_count: 0,
            cta_revision: 0,
            background_revision: 0,
            image_seq: 0,
            sample_seq: 0,
            sampler,
            tx,
            rx,
            in_flight: 0,
        })
    }

    /// Current composition state.
    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    /// Recently used colors, newest first.
    pub fn history(&self) -> &ColorHistory {
        &self.history
    }

    /// Whether the full color picker is showing.
    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    /// Last rendered frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Number of render passes run so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Whether a render is scheduled for the next pump.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Background jobs that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Whether the host offers a pixel sampler.
    pub fn sampler_available(&self) -> bool {
        self.sampler.is_available()
    }

    /// Replace the body copy.
    pub fn set_body_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.state.body_text != text {
            self.state.body_text = text;
            self.mark_dirty("body_text");
        }
    }

    /// Replace the CTA label.
    pub fn set_cta_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.state.cta_text != text {
            self.state.cta_text = text;
            self.mark_dirty("cta_text");
        }
    }

    /// Set the CTA button fill.
    pub fn set_cta_color(&mut self, color: Rgb8) {
        self.cta_revision += 1;
        if self.state.cta_color != color {
            self.state.cta_color = color;
            self.mark_dirty("cta_color");
        }
    }

    /// Set the background fill.
    pub fn set_background_color(&mut self, color: Rgb8) {
        self.background_revision += 1;
        if self.state.background_color != color {
            self.state.background_color = color;
            self.mark_dirty("background_color");
        }
    }

    /// Set the color feeding `target`.
    pub fn set_color(&mut self, target: ColorTarget, color: Rgb8) {
        match target {
            ColorTarget::Cta => self.set_cta_color(color),
            ColorTarget::Background => self.set_background_color(color),
        }
    }

    /// Show the full color picker. Never schedules a render.
    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    /// Hide the full color picker. Never schedules a render.
    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    /// Color chosen on the full picker: becomes the CTA fill, is remembered, closes the picker.
    pub fn pick_cta_color(&mut self, color: Rgb8) {
        self.set_cta_color(color);
        self.history.record(color);
        self.picker_open = false;
    }

    /// Apply history swatch `index` to the CTA fill without reordering history.
    pub fn select_history_color(&mut self, index: usize) -> Option<Rgb8> {
        let color = self.history.select(index)?;
        self.set_cta_color(color);
        Some(color)
    }

    /// Install an already decoded background image, superseding any pending load.
    pub fn set_image(&mut self, image: PreparedImage) {
        self.image_seq += 1;
        self.state.background_image = Some(image);
        self.mark_dirty("background_image");
    }

    /// Reserve a ticket for an image decoded elsewhere.
    pub fn begin_image_load(&mut self) -> ImageTicket {
        self.image_seq += 1;
        ImageTicket {
            seq: self.image_seq,
        }
    }

    /// Apply a finished decode. Only the most recent load may change the background.
    pub fn complete_image_load(
        &mut self,
        ticket: ImageTicket,
        result: AdResult<PreparedImage>,
    ) -> SessionEvent {
        if ticket.seq != self.image_seq {
            tracing::debug!(
                ticket = ticket.seq,
                latest = self.image_seq,
                "dropping superseded image"
            );
            return SessionEvent::ImageStale;
        }

        match result {
            Ok(image) => {
                let event = SessionEvent::ImageLoaded {
                    width: image.width,
                    height: image.height,
                };
                self.state.background_image = Some(image);
                self.mark_dirty("background_image");
                event
            }
            Err(err) => {
                tracing::warn!(%err, "image load failed; keeping previous background");
                SessionEvent::ImageRejected(err.to_string())
            }
        }
    }

    /// Decode `bytes` on the worker pool. The result applies on a later pump.
    pub fn load_image_bytes(&mut self, bytes: Vec<u8>) -> ImageTicket {
        let ticket = self.begin_image_load();
        self.spawn(
            move || Completion::Image(ticket, decode::decode_image(&bytes)),
            move |msg| Completion::Image(ticket, Err(AdError::decode(msg))),
        );
        ticket
    }

    /// Read and decode `path` on the worker pool. The result applies on a later pump.
    pub fn load_image_file(&mut self, path: impl Into<PathBuf>) -> ImageTicket {
        let path = path.into();
        let ticket = self.begin_image_load();
        self.spawn(
            move || Completion::Image(ticket, decode::load_image_file(&path)),
            move |msg| Completion::Image(ticket, Err(AdError::decode(msg))),
        );
        ticket
    }

    /// Reserve a ticket for a sample resolved elsewhere.
    ///
    /// Fails with [`SampleError::Unsupported`] when the host has no sampler; nothing changes.
    pub fn begin_sample(&mut self, target: ColorTarget) -> Result<SampleTicket, SampleError> {
        if !self.sampler.is_available() {
            tracing::info!("pixel sampler unavailable");
            return Err(SampleError::Unsupported);
        }
        self.sample_seq += 1;
        Ok(SampleTicket {
            seq: self.sample_seq,
            target,
            target_revision: self.revision(target),
        })
    }

    /// Apply a finished sample unless a newer request or a later user edit supersedes it.
    pub fn complete_sample(
        &mut self,
        ticket: SampleTicket,
        result: Result<Rgb8, SampleError>,
    ) -> SampleOutcome {
        let color = match result {
            Ok(color) => color,
            Err(err) => {
                match &err {
                    SampleError::Cancelled => tracing::info!("pixel sample cancelled"),
                    _ => tracing::warn!(%err, "pixel sample failed"),
                }
                return SampleOutcome::Failed(err);
            }
        };

        if ticket.seq != self.sample_seq || ticket.target_revision != self.revision(ticket.target)
        {
            tracing::debug!(
                color = %color,
                target = ?ticket.target,
                "dropping stale pixel sample"
            );
            return SampleOutcome::Stale;
        }

        self.set_color(ticket.target, color);
        self.history.record(color);
        SampleOutcome::Applied(color)
    }

    /// Run the host sampler on the worker pool. The result applies on a later pump.
    pub fn request_sample(&mut self, target: ColorTarget) -> Result<SampleTicket, SampleError> {
        let ticket = self.begin_sample(target)?;
        let SamplerCapability::Available(sampler) = self.sampler.clone() else {
            return Err(SampleError::Unsupported);
        };
        self.spawn(
            move || Completion::Sample(ticket, sampler.sample()),
            move |msg| Completion::Sample(ticket, Err(SampleError::Failed(msg))),
        );
        Ok(ticket)
    }

    /// Apply every finished job, then render once if anything changed.
    pub fn pump(&mut self) -> AdResult<PumpReport> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(done) => events.push(self.apply(done)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(AdError::render("session completion channel closed"));
                }
            }
        }
        let rendered = self.render_if_dirty()?;
        Ok(PumpReport { rendered, events })
    }

    /// Block until every dispatched job reported back, then pump.
    pub fn wait_idle(&mut self) -> AdResult<PumpReport> {
        let mut events = Vec::new();
        while self.in_flight > 0 {
            let done = self
                .rx
                .recv()
                .map_err(|_| AdError::render("session completion channel closed"))?;
            events.push(self.apply(done));
        }
        let mut report = self.pump()?;
        events.append(&mut report.events);
        report.events = events;
        Ok(report)
    }

    fn apply(&mut self, done: Completion) -> SessionEvent {
        self.in_flight = self.in_flight.saturating_sub(1);
        match done {
            Completion::Image(ticket, result) => self.complete_image_load(ticket, result),
            Completion::Sample(ticket, result) => {
                SessionEvent::Sample(self.complete_sample(ticket, result))
            }
        }
    }

    /// Run `job` on the worker pool. A panicking job reports `on_panic(message)` instead.
    fn spawn<J, P>(&mut self, job: J, on_panic: P)
    where
        J: FnOnce() -> Completion + Send + 'static,
        P: FnOnce(String) -> Completion + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        rayon::spawn(move || {
            let done = catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
                let msg = panic_message(payload.as_ref());
                tracing::error!(%msg, "background job panicked");
                on_panic(msg)
            });
            // The session may be gone by the time the job finishes.
            let _ = tx.send(done);
        });
    }

    fn render_if_dirty(&mut self) -> AdResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let frame = self.renderer.render(&self.state)?;
        self.dirty = false;
        self.frame = Some(frame);
        self.render_count += 1;
        tracing::debug!(render_count = self.render_count, "rendered composition");
        Ok(true)
    }

    fn revision(&self, target: ColorTarget) -> u64 {
        match target {
            ColorTarget::Cta => self.cta_revision,
            ColorTarget::Background => self.background_revision,
        }
    }

    fn mark_dirty(&mut self, field: &'static str) {
        tracing::trace!(field, "composition changed");
        self.dirty = true;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {s}")
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
