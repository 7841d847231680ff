use crate::libflash::card::{Rank, Suit};
use crate::libflash::deck::RawRow;
use crate::libflash::error::QuizError;
use crate::libflash::render::CardRenderer;
use crate::libflash::session::{LoadOutcome, LoadTicket, Session, Verdict};
use crate::libflash::source::DeckSource;
use eframe::egui;
use eframe::egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui};
use log::debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

type Delivery = (LoadTicket, Result<Vec<RawRow>, QuizError>);

/// Paints the card face with egui text; `size` is the card height in points.
pub struct EguiRenderer {
    pub size: f32,
}

impl CardRenderer<Ui> for EguiRenderer {
    fn render(&self, ui: &mut Ui, rank: Rank, suit: Suit) {
        let color = if suit.is_red() {
            Color32::from_rgb(200, 30, 30)
        } else {
            Color32::BLACK
        };
        Frame::default()
            .fill(Color32::WHITE)
            .stroke(Stroke::new(1.0, Color32::from_gray(204)))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(Margin::same(16))
            .show(ui, |ui| {
                ui.set_min_size(egui::vec2(self.size * 0.75, self.size));
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(rank.index()).size(self.size * 0.25).color(color));
                    ui.label(
                        RichText::new(suit.symbol().to_string())
                            .size(self.size * 0.4)
                            .color(color),
                    );
                });
            });
    }
}

struct GuiState<R> {
    session: Session,
    renderer: R,
    source_text: String,
    pending: Option<LoadTicket>,
    status: Option<String>,
    last: Option<Verdict>,
    sender: Sender<Delivery>,
    receiver: Receiver<Delivery>,
}

impl<R: CardRenderer<Ui>> GuiState<R> {
    fn new(
        ctx: &eframe::CreationContext,
        session: Session,
        renderer: R,
        source: DeckSource,
    ) -> Self {
        let (sender, receiver) = channel();
        let mut state = Self {
            session,
            renderer,
            source_text: source.to_string(),
            pending: None,
            status: None,
            last: None,
            sender,
            receiver,
        };
        state.start_load(&ctx.egui_ctx);
        state
    }

    /// Fetches on a worker thread; the result comes back through the channel.
    fn start_load(&mut self, ctx: &egui::Context) {
        let ticket = self.session.begin_load();
        let source = DeckSource::parse(&self.source_text);
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let rows = source.read();
            if sender.send((ticket, rows)).is_err() {
                debug!("[Source] Window closed before {} arrived", source);
            }
            ctx.request_repaint();
        });
        self.pending = Some(ticket);
    }

    fn collect_loads(&mut self) {
        while let Ok((ticket, rows)) = self.receiver.try_recv() {
            if self.pending == Some(ticket) {
                self.pending = None;
            }
            match self.session.finish_load(ticket, rows) {
                LoadOutcome::Applied => {
                    self.status = None;
                    self.last = None;
                }
                LoadOutcome::Stale => {}
                LoadOutcome::Failed(err) => {
                    self.status = Some(format!("could not load deck: {}", err));
                }
            }
        }
    }

    fn draw_verdict(&self, ui: &mut Ui) {
        match &self.last {
            Some(verdict) if verdict.correct => {
                ui.colored_label(Color32::DARK_GREEN, "Correct!");
            }
            Some(verdict) => {
                ui.colored_label(
                    Color32::RED,
                    format!("Incorrect! It was {:?}.", verdict.expected),
                );
            }
            None => {}
        }
    }
}

impl<R: CardRenderer<Ui>> eframe::App for GuiState<R> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_loads();

        let mut load = false;
        egui::TopBottomPanel::top("deck_source").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Deck:");
                let edit = ui.text_edit_singleline(&mut self.source_text);
                let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Load").clicked() || submitted {
                    load = true;
                }
                if self.pending.is_some() {
                    ui.spinner();
                }
            });
        });
        if load {
            self.start_load(ctx);
        }

        let mut picked: Option<String> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Flash Cards!");
                ui.label(RichText::new(format!("Score: {}", self.session.score())).size(19.0));
                if let Some(status) = &self.status {
                    ui.colored_label(Color32::RED, status.as_str());
                }
                self.draw_verdict(ui);
                ui.add_space(12.0);

                match self.session.current_question() {
                    Some(question) => {
                        self.renderer
                            .render(ui, question.card.rank, question.card.suit);
                        ui.add_space(16.0);
                        egui::Grid::new("answers")
                            .num_columns(2)
                            .spacing([16.0, 16.0])
                            .show(ui, |ui| {
                                for (idx, option) in question.options.iter().enumerate() {
                                    let button = egui::Button::new(option.as_str());
                                    if ui.add_sized([200.0, 60.0], button).clicked() {
                                        picked = Some(option.clone());
                                    }
                                    if idx % 2 == 1 {
                                        ui.end_row();
                                    }
                                }
                            });
                    }
                    None => {
                        ui.label("Load a CSV file to start playing!");
                    }
                }
            });
        });

        if let Some(choice) = picked {
            self.last = self.session.submit_answer(&choice);
        }
    }
}

pub fn init_gui<R: CardRenderer<Ui> + 'static>(
    session: Session,
    renderer: R,
    source: DeckSource,
) -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 600.0])
            .with_min_inner_size([440.0, 460.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flash Cards!",
        native_options,
        Box::new(move |cc| Ok(Box::new(GuiState::new(cc, session, renderer, source)))),
    )
}
