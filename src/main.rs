//! Arrows Away headless runner
//!
//! Drives the simulation with a scripted controller for soak and demo runs.
//! Drawing, audio and real controllers belong to the host; here one virtual
//! pad plays the game on autopilot.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use glam::IVec2;

    use arrows_away::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_MS};
    use arrows_away::sim::{GamePhase, GameState, PadInput, TickInput, tick};
    use arrows_away::{AssetBundle, Scene, Tuning};

    /// Ticks between autopilot button presses on waiting screens
    const ACK_INTERVAL: u64 = 30;
    const PAD_ID: u32 = 1;

    #[derive(Debug, Parser)]
    #[command(name = "arrows-away", version, about = "Run Arrows Away headless on autopilot")]
    struct Args {
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// RNG seed for enemy pursuit
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// JSON file overriding balance values
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// JSON file overriding asset sizes
        #[arg(long)]
        assets: Option<PathBuf>,
        #[arg(long, default_value_t = SCREEN_WIDTH)]
        width: i32,
        #[arg(long, default_value_t = SCREEN_HEIGHT)]
        height: i32,
        /// Print the final frame's scene as JSON
        #[arg(long)]
        dump_scene: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path).context("loading tuning")?,
            None => Tuning::default(),
        };
        let assets = match &args.assets {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading assets from {}", path.display()))?;
                AssetBundle::from_json(&json).context("parsing assets")?
            }
            None => AssetBundle::builtin(),
        };
        anyhow::ensure!(
            args.width > 0 && args.height > 0,
            "screen must be positive, got {}x{}",
            args.width,
            args.height
        );

        let screen = IVec2::new(args.width, args.height);
        let mut state = GameState::new(args.seed, screen, tuning, assets);
        log::info!(
            "Arrows Away (headless) seed {} on {}x{} for {} ticks",
            args.seed,
            screen.x,
            screen.y,
            args.ticks
        );

        for _ in 0..args.ticks {
            let input = TickInput {
                devices: vec![autopilot(&state)],
            };
            tick(&mut state, &input, TICK_MS);
        }

        log::info!(
            "Finished in {}: score {}, lives {}, level {}, {} enemies alive",
            state.phase.as_str(),
            state.score,
            state.lives,
            state.level_index + 1,
            state.alive_enemies()
        );

        if args.dump_scene {
            let scene = Scene::capture(&state);
            let json = serde_json::to_string_pretty(&scene).context("serializing scene")?;
            println!("{json}");
        }

        Ok(())
    }

    /// Back away from the nearest living enemy while shooting at it; press a
    /// button now and then on every waiting screen.
    fn autopilot(state: &GameState) -> PadInput {
        let mut pad = PadInput {
            id: PAD_ID,
            ..Default::default()
        };

        if state.phase != GamePhase::Running {
            pad.ack = state.time_ticks % ACK_INTERVAL == 0;
            return pad;
        }

        let hero = state.hero.pos();
        let nearest = state
            .enemies
            .iter()
            .filter(|e| e.is_alive())
            .min_by_key(|e| (e.pos() - hero).length_squared());
        if let Some(enemy) = nearest {
            let delta = (enemy.pos() - hero).as_vec2();
            let reach = delta.abs().max_element();
            if reach > 0.0 {
                pad.right = delta / reach;
                pad.left = -delta.normalize_or_zero();
            }
        }
        pad
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library directly
}
