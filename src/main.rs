mod difficulty;
mod events;
mod game;
mod logging;
mod menu;
mod render;
mod snake;
mod term;

use anyhow::{bail, Result};
use game::{Game, KeyOutcome};

pub type TermInt = u16;
pub type Coords = (u16, u16);

// Rows below the playfield reserved for score/level/controls
const HUD_ROWS: TermInt = 5;
const MIN_GRID_SIZE: TermInt = 10;

fn main() {
    logging::setup();

    let mut term = match term::TermManager::new() {
        Ok(term) => term,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    };

    let result = run(&mut term);

    // The terminal gets restored no matter how the session ended
    term.restore();

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(term: &mut term::TermManager) -> Result<()> {
    term.setup()?;

    let (width, term_height) = term.size();
    let height = term_height.saturating_sub(HUD_ROWS);
    if width < MIN_GRID_SIZE || height < MIN_GRID_SIZE {
        bail!("terminal too small: need at least {0}x{0} playfield cells", MIN_GRID_SIZE);
    }

    let tier = match menu::select_difficulty(term)? {
        Some(tier) => tier,
        None => return Ok(()),
    };

    let mut game = Game::new(width, height, tier);
    log::info!(
        "session started: {} tier, {}x{} grid",
        tier.name(),
        width,
        height
    );

    let events = events::EventPump::start(game.tick_interval());

    // One event per iteration: a tick advances the game, a key press goes
    // through the input mapper. Nothing else ever touches the state.
    loop {
        render::draw(term, &game)?;

        match events.next() {
            None => break,
            Some(events::GameEvent::Tick) => {
                game.advance();
                events.set_tick_interval(game.tick_interval());
            }
            Some(events::GameEvent::Key(key)) => match game.apply_key(&key) {
                KeyOutcome::Handled => {}
                KeyOutcome::Quit => {
                    log::info!("quit, final score {}", game.score());
                    break;
                }
                KeyOutcome::Restart => {
                    game = Game::new(width, height, tier);
                    events.set_tick_interval(game.tick_interval());
                    log::info!("restarted on the {} tier", tier.name());
                }
            },
        }
    }

    Ok(())
}
