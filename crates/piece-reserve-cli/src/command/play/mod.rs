use std::io;

use piece_reserve_engine::{GameController, PieceSeed};

pub(crate) use self::menu::StateFormat;

mod menu;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece seed as 32 hex digits, to replay a previous session
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// How the queue and reserve stack are shown before each prompt
    #[clap(long, value_enum, default_value_t = StateFormat::Text)]
    pub(crate) state_format: StateFormat,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, state_format } = arg;

    let mut controller = match seed {
        Some(seed) => GameController::with_seed(*seed),
        None => GameController::new(),
    };
    log::info!("starting session with seed {}", controller.seed());

    let input = io::stdin().lock();
    let output = io::stdout().lock();
    menu::run(&mut controller, input, output, *state_format)
}
