use std::time::Duration;

use bigram_core::BigramProbability;
use bigram_core::model::sampling_options::{DEFAULT_MAX_LEN, MAX_MAX_LEN, MAX_NB_TRY};
use eframe::{egui, Frame};
use egui::Context;

use reqwest::blocking::Client;
use reqwest::Result;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Horizontal space taken by one bar of the chart.
const BAR_WIDTH: f32 = 18.0;
const CHART_HEIGHT: f32 = 220.0;
/// Space under the bars for the bigram labels.
const LABEL_HEIGHT: f32 = 36.0;

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
    base_url: String,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(5, 0))
            .build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Sends a GET request to `/v1/generate` with query parameters.
    fn get_generated(&self, params: &[(String, String)]) -> Result<String> {
        self.client
            .get(self.url("/v1/generate"))
            .query(params)
            .send()?
            .error_for_status()?
            .text()
    }

    /// Sends a GET request to `/v1/bigrams`.
    fn get_bigrams(&self) -> Result<Vec<BigramProbability>> {
        self.client
            .get(self.url("/v1/bigrams"))
            .send()?
            .error_for_status()?
            .json()
    }

    /// Sends a GET request to `/v1/corpora`.
    fn get_corpora(&self) -> Result<String> {
        self.client
            .get(self.url("/v1/corpora"))
            .send()?
            .error_for_status()?
            .text()
    }

    fn get_loaded_corpus(&self) -> Result<String> {
        self.client
            .get(self.url("/v1/loaded_corpus"))
            .send()?
            .error_for_status()?
            .text()
    }

    /// Sends a PUT request to `/v1/load_corpus`.
    fn put_load_corpus(&self, name: &str) -> Result<String> {
        self.client
            .put(self.url("/v1/load_corpus"))
            .query(&[("name", name)])
            .send()?
            .error_for_status()?
            .text()
    }
}

/// Global UI state (MUST persist between frames in egui).
struct GeneratorUI {
    rest: RESTContext,
    last_word: Option<String>,
    selected_corpus: String,
    available_corpora: Vec<String>,

    max_len: usize,
    nb_try: usize,

    use_seed: bool,
    seed: u64,

    bigrams: Vec<BigramProbability>,
}

impl GeneratorUI {
    /// Initializes the UI with sane defaults.
    fn new() -> Result<Self> {
        let base_url =
            std::env::var("BIGRAM_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_owned());

        let mut generator = Self {
            rest: RESTContext::new(base_url)?,
            last_word: None,
            selected_corpus: String::new(),
            available_corpora: Vec::new(),

            max_len: DEFAULT_MAX_LEN,
            nb_try: 5,

            use_seed: false,
            seed: 0,

            bigrams: Vec::new(),
        };
        generator.get_corpora();
        generator.get_loaded_corpus();
        generator.get_bigrams();
        Ok(generator)
    }

    /// Builds the query parameters for `/v1/generate`.
    fn build_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("max_len".to_owned(), self.max_len.to_string()),
            ("nb_try".to_owned(), self.nb_try.to_string()),
        ];
        if self.use_seed {
            params.push(("seed".to_owned(), self.seed.to_string()));
        }
        params
    }

    fn get_generated(&mut self) {
        let params = self.build_query();
        match self.rest.get_generated(&params) {
            Ok(word) => self.last_word = Some(word),
            Err(e) => self.last_word = Some(format!("Error: {e}")),
        }
    }

    fn get_bigrams(&mut self) {
        match self.rest.get_bigrams() {
            Ok(bigrams) => self.bigrams = bigrams,
            Err(e) => {
                self.bigrams.clear();
                self.last_word = Some(format!("Error: {e}"));
            }
        }
    }

    fn get_corpora(&mut self) {
        match self.rest.get_corpora() {
            Ok(names) => {
                self.available_corpora = names
                    .lines()
                    .map(|s| s.trim().to_owned())
                    .filter(|s| !s.is_empty())
                    .collect()
            }
            Err(e) => self.last_word = Some(format!("Error: {e}")),
        }
    }

    fn get_loaded_corpus(&mut self) {
        match self.rest.get_loaded_corpus() {
            Ok(name) => self.selected_corpus = name.trim().to_owned(),
            Err(e) => self.last_word = Some(format!("Error: {e}")),
        }
    }

    /// Loads the selected corpus on the server and refreshes the chart.
    fn put_load_corpus(&mut self) {
        match self.rest.put_load_corpus(&self.selected_corpus) {
            Ok(message) => {
                self.last_word = Some(message);
                self.get_bigrams();
            }
            Err(e) => self.last_word = Some(format!("Error: {e}")),
        }
    }

    /// Paints one bar per bigram, labels underneath, value on hover.
    fn show_chart(&self, ui: &mut egui::Ui) {
        if self.bigrams.is_empty() {
            ui.label("No bigrams to plot");
            return;
        }

        egui::ScrollArea::horizontal().show(ui, |ui| {
            let width = (self.bigrams.len() as f32 * BAR_WIDTH).max(ui.available_width());
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, CHART_HEIGHT), egui::Sense::hover());
            let rect = response.rect;
            let baseline = rect.bottom() - LABEL_HEIGHT;
            let text_color = ui.visuals().text_color();

            for (i, entry) in self.bigrams.iter().enumerate() {
                let left = rect.left() + i as f32 * BAR_WIDTH;
                let height = entry.probability as f32 * (baseline - rect.top());
                let bar = egui::Rect::from_min_max(
                    egui::pos2(left + 1.0, baseline - height),
                    egui::pos2(left + BAR_WIDTH - 1.0, baseline),
                );
                painter.rect_filled(bar, 0.0, egui::Color32::from_rgb(70, 130, 180));
                painter.text(
                    egui::pos2(left + BAR_WIDTH / 2.0, baseline + 4.0),
                    egui::Align2::CENTER_TOP,
                    &entry.bigram,
                    egui::FontId::monospace(7.0),
                    text_color,
                );
            }

            let hovered = response
                .hover_pos()
                .map(|pos| ((pos.x - rect.left()) / BAR_WIDTH) as usize)
                .and_then(|index| self.bigrams.get(index));
            if let Some(entry) = hovered {
                response.on_hover_text(format!("{}: {:.4}", entry.bigram, entry.probability));
            }
        });
    }
}

impl eframe::App for GeneratorUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Grid::new("generator_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    // corpus
                    ui.label("Corpus");
                    let previous_corpus = self.selected_corpus.clone();
                    egui::ComboBox::from_id_salt("corpus")
                        .selected_text(self.selected_corpus.as_str())
                        .show_ui(ui, |ui| {
                            for corpus in &self.available_corpora {
                                ui.selectable_value(&mut self.selected_corpus, corpus.clone(), corpus.as_str());
                            }
                        });
                    if self.selected_corpus != previous_corpus {
                        self.put_load_corpus();
                    }
                    ui.end_row();

                    // max_len
                    ui.label("Maximum length");
                    ui.add(egui::DragValue::new(&mut self.max_len).range(1..=MAX_MAX_LEN).speed(1));
                    ui.end_row();

                    // nb_try
                    ui.label("Number of tries");
                    ui.add(egui::DragValue::new(&mut self.nb_try).range(0..=MAX_NB_TRY).speed(1));
                    ui.end_row();

                    // seed
                    ui.checkbox(&mut self.use_seed, "Fixed seed");
                    if self.use_seed {
                        ui.add(egui::DragValue::new(&mut self.seed));
                    } else {
                        ui.label("Random seed on every request");
                    }
                    ui.end_row();

                    ui.separator();
                    ui.end_row();

                    if ui
                        .add_sized([200.0, 40.0], egui::Button::new("Generate"))
                        .clicked()
                    {
                        self.get_generated();
                    }

                    if let Some(word) = &self.last_word {
                        ui.label(word);
                    } else {
                        ui.label("Click Generate to start");
                    }
                    ui.end_row();
                });

            ui.separator();
            ui.horizontal(|ui| {
                ui.heading("Bigram Probabilities");
                if ui.button("Refresh").clicked() {
                    self.get_bigrams();
                }
            });
            self.show_chart(ui);
        });
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "bigram-generator",
        options,
        Box::new(|_| Ok(Box::new(GeneratorUI::new()?))),
    )
}
