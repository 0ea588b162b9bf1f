use clap::Parser;
use rand::prelude::*;

use engine::{mapgen, prelude::*};
use util::{srng, RngExt};

#[derive(Parser, Debug)]
struct Args {
    /// Game world seed, random when not given.
    #[arg(long)]
    seed: Option<u64>,

    /// Map width and height.
    #[arg(long, default_value_t = 48)]
    size: i32,

    /// How many scheduler ticks to run before stopping.
    #[arg(long, default_value_t = 2000)]
    ticks: u32,

    /// Scripted player moves, vi keys `hjklyubn` plus `.` for waiting.
    /// The player walks at random once the script runs out.
    #[arg(long, default_value = "")]
    script: String,

    /// Show the player's light intensities instead of map glyphs.
    #[arg(long)]
    show_light: bool,
}

fn main() -> anyhow::Result<()> {
    // Info-level logging by default, RUST_LOG overrides.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("seed: {seed}");
    let mut rng = srng(&seed);

    let mut level = Level::new([args.size, args.size]);
    let rooms = mapgen::generate(&mut level, &mut rng)?;
    mapgen::populate(&mut level, &rooms, &mut rng)?;

    let mut script = args.script.chars();
    let mut turn = 0;
    for _ in 0..args.ticks {
        match level.tick() {
            Tick::Idle => break,
            Tick::Acted => {}
            Tick::AwaitingInput => {
                turn += 1;
                println!("turn {turn}");
                print!("{}", render(&level, args.show_light));
                level.push_command(next_command(&mut script, &mut rng));
            }
        }
        if level.player().is_none() {
            break;
        }
    }

    print!("{}", render(&level, args.show_light));
    if level.player().is_none() {
        println!("game over");
    }
    Ok(())
}

fn next_command(
    script: &mut impl Iterator<Item = char>,
    rng: &mut (impl Rng + ?Sized),
) -> Command {
    if let Some(c) = script.next() {
        return match c {
            'h' => Command::Move(ivec2(-1, 0)),
            'j' => Command::Move(ivec2(0, 1)),
            'k' => Command::Move(ivec2(0, -1)),
            'l' => Command::Move(ivec2(1, 0)),
            'y' => Command::Move(ivec2(-1, -1)),
            'u' => Command::Move(ivec2(1, -1)),
            'b' => Command::Move(ivec2(-1, 1)),
            'n' => Command::Move(ivec2(1, 1)),
            _ => Command::Wait,
        };
    }

    // Drunkard's walk after the script runs out.
    if rng.one_chance_in(6) {
        Command::Wait
    } else {
        Command::Move(DIR_8[rng.gen_range(0..DIR_8.len())])
    }
}

/// Draw the map with unexplored cells blank and remembered but currently
/// unseen cells as bare terrain.
fn render(level: &Level, show_light: bool) -> String {
    let player = level.player();
    let dim = level.dim();

    let mut out = String::new();
    for y in 0..dim.y {
        for x in 0..dim.x {
            let pos = ivec2(x, y);
            let c = if show_light {
                match player.map(|p| p.light_at(level, pos)) {
                    Some(light) if light > 0.0 => {
                        char::from(b'0' + (light * 9.0).round() as u8)
                    }
                    _ => ' ',
                }
            } else if level.player_sees(pos) {
                level.glyph(pos)
            } else if level.is_seen(pos) {
                char::from(level.tile(pos))
            } else {
                ' '
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
