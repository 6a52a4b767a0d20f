use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::Rng;

use weak_prng_key_recovery::config::{seed_range, window_range, SECURE_SEED_END};
use weak_prng_key_recovery::{
	predict_keys, Aes128Ecb, Bytes, CancelToken, CipherOracle, InversionConfig, KnownPrefix, Lcg, LogProgress,
	SeedRange, SeedRangeConfig, SeedRangeSearch, StateInversion,
};

const PLAINTEXT: &str = "this message starts with \"this \"!";
const SEARCH_STR: &str = "this ";

#[derive(Parser, Debug)]
#[command(author, version, about = "Recover keys generated with the portable C rand()")]
struct Args {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Encrypt a sample under the key for --seed, then search a seed range for it.
	SeedRange {
		/// Seed the victim used. Drawn at random below 2^31 when omitted.
		#[arg(long)]
		seed: Option<i64>,
		/// First seed to try.
		#[arg(long, requires = "end")]
		start: Option<i64>,
		/// One past the last seed to try.
		#[arg(long, requires = "start")]
		end: Option<i64>,
		/// Search the current time plus or minus this many seconds.
		#[arg(long, conflicts_with_all = ["start", "end"])]
		window: Option<i64>,
		#[arg(long, default_value = PLAINTEXT)]
		plaintext: String,
		#[arg(long, default_value = SEARCH_STR)]
		prefix: String,
	},
	/// Search a seed range for the key of an existing ciphertext.
	Crack {
		/// Ciphertext as hex or base64.
		#[arg(long)]
		ciphertext: String,
		#[arg(long)]
		prefix: String,
		#[arg(long)]
		start: i64,
		#[arg(long)]
		end: i64,
	},
	/// Recover the generator state from two consecutive outputs.
	Invert {
		#[arg(long, requires = "p2")]
		p1: Option<u16>,
		#[arg(long, requires = "p1")]
		p2: Option<u16>,
		#[arg(long, default_value_t = 1)]
		scale: u32,
		#[arg(long, default_value_t = 256)]
		max: u32,
		/// Number of future keys to predict from each recovered state.
		#[arg(long, default_value_t = 0)]
		predict: usize,
	},
}

fn now() -> Result<i64> {
	let secs = SystemTime::now().duration_since(UNIX_EPOCH).context("system clock before 1970")?.as_secs();
	Ok(i64::try_from(secs)?)
}

/// Cancels `token` on Ctrl-C so a long search stops after its current chunk.
fn cancel_on_interrupt(token: &CancelToken) -> Result<()> {
	let token = token.clone();
	ctrlc::set_handler(move || {
		log::warn!("interrupted, stopping after the current chunk");
		token.cancel();
	})
	.context("installing Ctrl-C handler")
}

fn print_matches(search: &SeedRangeSearch<Aes128Ecb>, range: SeedRange, cancel: &CancelToken) {
	let outcome = search.run_with(range, &LogProgress, cancel);
	if !outcome.is_complete() {
		println!("Search interrupted after {} of {} seeds", outcome.searched, range.len());
	}
	for m in outcome.found {
		println!("Possible match ({}): {}", m.seed, m.plaintext);
	}
}

fn seed_range_cmd(
	seed: Option<i64>,
	start: Option<i64>,
	end: Option<i64>,
	window: Option<i64>,
	plaintext: String,
	prefix: String,
	cancel: &CancelToken,
) -> Result<()> {
	let fixed_seed = match seed {
		Some(seed) => seed,
		None => {
			let seed = rand::thread_rng().gen_range(0..SECURE_SEED_END);
			println!("The seed is {}", seed);
			seed
		}
	};
	let (start, end) = match (start, end, window) {
		(Some(start), Some(end), _) => (start, end),
		(_, _, Some(window)) => window_range(now()?, window)?,
		_ => (0, SECURE_SEED_END),
	};

	let config = SeedRangeConfig {
		start,
		end,
		known_prefix: prefix.into_bytes(),
		plaintext: plaintext.into_bytes(),
		fixed_seed,
	};
	let valid = config.validate::<Aes128Ecb>()?;
	println!("Plaintext to match: {}", Bytes::from_vec(valid.plaintext.clone()));
	let search = SeedRangeSearch::from_config(Aes128Ecb, &valid)?;
	let ciphertext = Bytes::from_vec(search.ciphertext().to_vec());
	println!("Ciphertext (hex): {}", ciphertext.to_hex());
	println!("Ciphertext (base64): {}", ciphertext.to_base64());
	print_matches(&search, valid.range, cancel);
	Ok(())
}

fn crack_cmd(ciphertext: &str, prefix: String, start: i64, end: i64, cancel: &CancelToken) -> Result<()> {
	let ciphertext = Bytes::from_encoded(ciphertext)?;
	let range = seed_range(start, end)?;
	let search = SeedRangeSearch::new(Aes128Ecb, ciphertext.into_vec(), KnownPrefix::new(prefix)?)?;
	print_matches(&search, range, cancel);
	Ok(())
}

fn invert_cmd(p1: Option<u16>, p2: Option<u16>, scale: u32, max: u32, predict: usize, cancel: &CancelToken) -> Result<()> {
	let (p1, p2) = match (p1, p2) {
		(Some(p1), Some(p2)) => (p1, p2),
		(None, None) => {
			let seed: u32 = rand::thread_rng().gen_range(0..SECURE_SEED_END as u32);
			println!("The seed is {}", seed);
			let mut lcg = Lcg::new(seed);
			let p1 = lcg.next();
			println!("State is {}", lcg.state());
			(p1, lcg.next())
		}
		_ => bail!("--p1 and --p2 must be given together"),
	};

	let inversion = StateInversion::new(InversionConfig { p1, p2, scale_factor: scale, max_candidates: max })?;
	let outcome = inversion.run_with(&LogProgress, cancel);
	if !outcome.is_complete() {
		println!("Search interrupted after {} of {} guesses", outcome.searched, inversion.config().search_len());
	}
	for state in outcome.found {
		println!("Found potential state {}", state);
		for key in predict_keys(state, Aes128Ecb::KEY_SIZE, predict) {
			println!("  next key {}", Bytes::from_vec(key).to_hex());
		}
	}
	Ok(())
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	let cancel = CancelToken::new();
	cancel_on_interrupt(&cancel)?;

	match args.command {
		Command::SeedRange { seed, start, end, window, plaintext, prefix } => {
			seed_range_cmd(seed, start, end, window, plaintext, prefix, &cancel)
		}
		Command::Crack { ciphertext, prefix, start, end } => crack_cmd(&ciphertext, prefix, start, end, &cancel),
		Command::Invert { p1, p2, scale, max, predict } => invert_cmd(p1, p2, scale, max, predict, &cancel),
	}
}
