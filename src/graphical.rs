//! Window front end drawn with egui.
//!
//! eframe owns the main thread, so the controller runs elsewhere: `channel` hands
//! back a `GraphicalFrontEnd` for the controller thread and a `BoardWindow` for
//! `show`. Clicks travel to the controller over a channel; the controller publishes
//! what the window should draw into a shared `ViewState`.
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use egui::{Color32, CornerRadius, Pos2, Rect, Sense, Vec2};
use log::{debug, info};

use crate::c4::{Board, C4Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::C4Error;
use crate::game::{FrontEnd, Game, HumanTurn, Outcome, Status};
use crate::player::PlayerId;

const CELL_SIZE: f32 = 64.0;
const BOARD_MARGIN: f32 = 8.0;
const TOKEN_RADIUS: f32 = CELL_SIZE * 0.4;

const BOARD_COLOUR: Color32 = Color32::from_rgb(30, 70, 160);
const HOLE_COLOUR: Color32 = Color32::from_rgb(235, 235, 240);
const PLAYER_ONE_COLOUR: Color32 = Color32::from_rgb(210, 40, 40);
const PLAYER_TWO_COLOUR: Color32 = Color32::from_rgb(240, 200, 30);
const HOVER_COLOUR: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 40);

/// Everything the window draws, as last published by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub board: Board,
    pub status: Status,
    /// Set while the controller waits for a click from this player.
    pub awaiting: Option<PlayerId>,
    pub message: Option<String>,
    pub outcome: Option<Outcome>,
    /// The window has gone; the controller should stop.
    pub closed: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            board: Board::new(),
            status: Status::InProgress(PlayerId::One),
            awaiting: None,
            message: None,
            outcome: None,
            closed: false,
        }
    }
}

impl ViewState {
    /// One line telling the user where the match stands.
    pub fn status_line(&self) -> String {
        let headline = match (self.outcome, self.awaiting, self.status) {
            (Some(Outcome::Won(winner)), _, _) => format!("Player {} wins!", winner.symbol()),
            (Some(Outcome::Drawn), _, _) => "It's a draw.".to_string(),
            (Some(Outcome::Aborted), _, _) => "Game abandoned.".to_string(),
            (None, Some(player), _) => {
                format!("Player {}: click a column", player.symbol())
            }
            (None, None, Status::InProgress(player)) => {
                format!("Player {} is thinking", player.symbol())
            }
            (None, None, Status::Won(winner)) => format!("Player {} wins!", winner.symbol()),
            (None, None, Status::Drawn) => "It's a draw.".to_string(),
        };
        match &self.message {
            Some(message) => format!("{} ({})", headline, message),
            None => headline,
        }
    }
}

#[derive(Default)]
struct Shared {
    view: ViewState,
    repaint: Option<egui::Context>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

///
/// Creates the two halves of a window front end: the `FrontEnd` the controller
/// plays through, and the window that feeds it clicks.
///
pub fn channel() -> (GraphicalFrontEnd, BoardWindow) {
    let shared = Arc::new(Mutex::new(Shared::default()));
    let (turns, receiver) = mpsc::channel();
    (
        GraphicalFrontEnd {
            shared: Arc::clone(&shared),
            turns: receiver,
        },
        BoardWindow { shared, turns },
    )
}

/// Controller side of the window.
pub struct GraphicalFrontEnd {
    shared: Arc<Mutex<Shared>>,
    turns: Receiver<HumanTurn>,
}

impl GraphicalFrontEnd {
    fn publish<F: FnOnce(&mut ViewState)>(&self, update: F) {
        let mut shared = lock(&self.shared);
        update(&mut shared.view);
        if let Some(ctx) = &shared.repaint {
            ctx.request_repaint();
        }
    }

    pub fn view(&self) -> ViewState {
        lock(&self.shared).view.clone()
    }
}

impl FrontEnd for GraphicalFrontEnd {
    fn get_human_turn(&mut self, game: &Game, player: PlayerId) -> HumanTurn {
        if lock(&self.shared).view.closed {
            return HumanTurn::Quit;
        }
        self.publish(|view| {
            view.board = game.board().clone();
            view.status = game.status();
            view.awaiting = Some(player);
        });
        // A dropped window closes the channel.
        let turn = self.turns.recv().unwrap_or(HumanTurn::Quit);
        debug!("Window answered {:?} for {:?}", turn, player);
        self.publish(|view| view.awaiting = None);
        turn
    }

    fn visualise_state(&mut self, game: &Game) {
        self.publish(|view| {
            view.board = game.board().clone();
            view.status = game.status();
            view.message = None;
        });
    }

    fn reject_move(&mut self, error: &C4Error) {
        let message = error.to_string();
        self.publish(|view| view.message = Some(message));
    }

    fn announce_outcome(&mut self, game: &Game, outcome: Outcome) {
        self.publish(|view| {
            view.board = game.board().clone();
            view.status = game.status();
            view.awaiting = None;
            view.outcome = Some(outcome);
        });
    }

    fn wants_quit(&mut self) -> bool {
        lock(&self.shared).view.closed
    }
}

/// Window side: draws the shared view and turns clicks into moves.
pub struct BoardWindow {
    shared: Arc<Mutex<Shared>>,
    turns: Sender<HumanTurn>,
}

impl BoardWindow {
    fn attach(&self, ctx: egui::Context) {
        lock(&self.shared).repaint = Some(ctx);
    }

    pub fn view(&self) -> ViewState {
        lock(&self.shared).view.clone()
    }

    ///
    /// Plays `column` for the player the controller is waiting on. Returns false,
    /// sending nothing, when no human move is wanted right now.
    ///
    pub fn drop_token(&self, column: usize) -> bool {
        let mut shared = lock(&self.shared);
        if shared.view.awaiting.take().is_none() {
            return false;
        }
        self.turns.send(HumanTurn::Drop(column)).is_ok()
    }

    /// Marks the window gone and releases a controller waiting on a click.
    pub fn close(&self) {
        let mut shared = lock(&self.shared);
        if !shared.view.closed {
            info!("Window closed");
            shared.view.closed = true;
            let _ = self.turns.send(HumanTurn::Quit);
        }
    }

    fn draw_board(&self, ui: &mut egui::Ui) {
        let size = Vec2::new(
            BOARD_WIDTH as f32 * CELL_SIZE + 2.0 * BOARD_MARGIN,
            BOARD_HEIGHT as f32 * CELL_SIZE + 2.0 * BOARD_MARGIN,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let rect = response.rect;
        let view = self.view();

        painter.rect_filled(rect, CornerRadius::same(6), BOARD_COLOUR);

        let hovered = response
            .hover_pos()
            .filter(|_| view.awaiting.is_some())
            .and_then(|pos| column_at(rect.min.x, pos.x));
        if let Some(column) = hovered {
            let left = rect.min.x + BOARD_MARGIN + column as f32 * CELL_SIZE;
            let strip = Rect::from_min_size(
                Pos2::new(left, rect.min.y + BOARD_MARGIN),
                Vec2::new(CELL_SIZE, BOARD_HEIGHT as f32 * CELL_SIZE),
            );
            painter.rect_filled(strip, CornerRadius::same(4), HOVER_COLOUR);
        }

        for row in 0..BOARD_HEIGHT {
            for column in 0..BOARD_WIDTH {
                let colour = match view.board.get(row, column) {
                    C4Cell::Empty => HOLE_COLOUR,
                    C4Cell::Filled(PlayerId::One) => PLAYER_ONE_COLOUR,
                    C4Cell::Filled(PlayerId::Two) => PLAYER_TWO_COLOUR,
                };
                painter.circle_filled(cell_centre(rect, row, column), TOKEN_RADIUS, colour);
            }
        }

        if response.clicked() {
            if let Some(column) = hovered {
                self.drop_token(column);
            }
        }
    }
}

impl Drop for BoardWindow {
    fn drop(&mut self) {
        self.close();
    }
}

impl eframe::App for BoardWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.close();
        }
        let status = self.view().status_line();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(status);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_board(ui);
        });
    }
}

fn cell_centre(rect: Rect, row: usize, column: usize) -> Pos2 {
    Pos2::new(
        rect.min.x + BOARD_MARGIN + (column as f32 + 0.5) * CELL_SIZE,
        rect.min.y + BOARD_MARGIN + (row as f32 + 0.5) * CELL_SIZE,
    )
}

/// Column under horizontal position `x` for a board whose left edge is at `left`.
pub fn column_at(left: f32, x: f32) -> Option<usize> {
    let offset = (x - left - BOARD_MARGIN) / CELL_SIZE;
    if offset < 0.0 {
        return None;
    }
    let column = offset.floor() as usize;
    (column < BOARD_WIDTH).then_some(column)
}

///
/// Opens the window and runs it until the user closes it. Blocks the calling thread,
/// which must be the main one.
///
pub fn show(window: BoardWindow) -> Result<(), C4Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                BOARD_WIDTH as f32 * CELL_SIZE + 4.0 * BOARD_MARGIN + 16.0,
                BOARD_HEIGHT as f32 * CELL_SIZE + 4.0 * BOARD_MARGIN + 48.0,
            ])
            .with_title("Connect Four"),
        ..Default::default()
    };
    eframe::run_native(
        "c4",
        options,
        Box::new(move |cc| {
            window.attach(cc.egui_ctx.clone());
            Ok(Box::new(window))
        }),
    )
    .map_err(|error| C4Error::Window(error.to_string()))
}
