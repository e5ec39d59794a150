use std::path::{Path, PathBuf};
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{info, warn};
use serde::Deserialize;

use bigram_core::io::list_files;
use bigram_core::{BigramError, Generator, SamplingOptions};

/// Extension of corpus files in the data directory.
const CORPUS_EXTENSION: &str = "txt";

/// Retries used by `/v1/generate` when the query leaves `nb_try` out.
const DEFAULT_NB_TRY: usize = 5;

/// REST service generating names from a character bigram model.
#[derive(Parser, Debug, Clone)]
#[command(name = "bigram-server", version)]
struct Flags {
	/// Address to bind
	#[arg(long, env = "BIGRAM_HOST", default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, env = "BIGRAM_PORT", default_value_t = 5000)]
	port: u16,

	/// Directory holding the `.txt` corpora
	#[arg(long, env = "BIGRAM_DATA_DIR", default_value = "./data")]
	data_dir: PathBuf,

	/// Corpus loaded at start-up (file stem, e.g. `names`)
	#[arg(long, env = "BIGRAM_CORPUS")]
	corpus: Option<String>,
}

/// Query parameters of `/v1/generate`
#[derive(Deserialize)]
struct GenerateParams {
	max_len: Option<usize>,
	nb_try: Option<usize>,
	seed: Option<u64>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	name: Option<String>,
}

struct SharedData {
	generator: Option<Generator>,
	data_dir: PathBuf,
}

impl GenerateParams {
	fn sampling_options(&self) -> Result<SamplingOptions, BigramError> {
		let mut options = SamplingOptions::new();
		if let Some(max_len) = self.max_len {
			options.set_max_len(max_len)?;
		}
		options.set_nb_try(self.nb_try.unwrap_or(DEFAULT_NB_TRY))?;
		options.seed = self.seed;
		Ok(options)
	}
}

/// Builds the generator of `<data_dir>/<name>.txt`.
fn load_corpus(data_dir: &Path, name: &str) -> Result<Generator, BigramError> {
	if name.contains(['/', '\\']) || name.starts_with('.') {
		return Err(BigramError::InvalidInput(format!("Invalid corpus name: {name}")));
	}
	Generator::new(data_dir.join(format!("{name}.{CORPUS_EXTENSION}")))
}

fn error_response(err: &BigramError) -> HttpResponse {
	match err {
		BigramError::InvalidInput(_) => HttpResponse::BadRequest().body(err.to_string()),
		_ => HttpResponse::InternalServerError().body(err.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Samples one name from the loaded corpus.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let options = match query.sampling_options() {
		Ok(options) => options,
		Err(e) => return error_response(&e),
	};

	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match &shared_data.generator {
		Some(generator) => HttpResponse::Ok().body(generator.generate(&options)),
		None => HttpResponse::ServiceUnavailable().body("No corpus loaded"),
	}
}

/// HTTP GET endpoint `/v1/bigrams`
///
/// Returns the flattened transition table as JSON.
#[get("/v1/bigrams")]
async fn get_bigrams(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match &shared_data.generator {
		Some(generator) => HttpResponse::Ok().json(generator.model().bigram_probabilities()),
		None => HttpResponse::ServiceUnavailable().body("No corpus loaded"),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let data_dir = match data.read() {
		Ok(d) => d.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let suffix = format!(".{CORPUS_EXTENSION}");
	match list_files(&data_dir, CORPUS_EXTENSION) {
		Ok(files) => {
			let names: Vec<&str> = files.iter().filter_map(|f| f.strip_suffix(&suffix)).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/loaded_corpus")]
async fn get_loaded_corpus(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let name = shared_data.generator.as_ref().map(Generator::name).unwrap_or_default();
	HttpResponse::Ok().body(name.to_owned())
}

/// HTTP PUT endpoint `/v1/load_corpus`
///
/// Builds the named corpus off the worker and outside the lock, then swaps it in.
#[put("/v1/load_corpus")]
async fn put_corpus(data: web::Data<RwLock<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim().to_owned(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let data_dir = match data.read() {
		Ok(d) => d.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	// Reading and counting the corpus runs on the blocking thread pool
	let loaded = {
		let name = name.clone();
		web::block(move || load_corpus(&data_dir, &name)).await
	};

	let generator = match loaded {
		Ok(Ok(g)) => g,
		Ok(Err(e)) => {
			warn!("failed to load corpus '{name}': {e}");
			return error_response(&e);
		}
		Err(e) => {
			warn!("corpus loading task for '{name}' failed: {e}");
			return HttpResponse::InternalServerError().body("Corpus loading failed");
		}
	};

	match data.write() {
		Ok(mut d) => d.generator = Some(generator),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	}

	HttpResponse::Ok().body("Corpus loaded successfully")
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_bigrams)
		.service(get_corpora)
		.service(get_loaded_corpus)
		.service(put_corpus);
}

/// Main entry point for the server.
///
/// Optionally loads a start-up corpus (failure is fatal), wraps the shared
/// state in a `RwLock` so generation requests only take a read lock, and
/// starts the Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let flags = Flags::parse();

	let generator = match &flags.corpus {
		Some(name) => Some(load_corpus(&flags.data_dir, name).map_err(std::io::Error::other)?),
		None => None,
	};

	let shared_data = web::Data::new(RwLock::new(SharedData {
		generator,
		data_dir: flags.data_dir.clone(),
	}));

	info!("listening on {}:{}", flags.host, flags.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(routes)
	})
		.bind((flags.host.as_str(), flags.port))?
		.run()
		.await
}
