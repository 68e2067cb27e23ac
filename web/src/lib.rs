use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod lobby;
mod socket;
mod solo;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Play alone against the clock, without a server
    #[arg(long)]
    solo: bool,

    #[command(flatten)]
    game: game::GameProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).unwrap_or_else(|err| {
        gloo::console::error!(err.to_string());
        Args::parse_from([""])
    });
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    if args.solo {
        log::info!("starting solo game");
        yew::Renderer::<solo::SoloView>::with_root(root).render();
    } else {
        log::info!("starting game against {}", args.game.server);
        yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_flags_reach_game_props() {
        let args = Args::try_parse_from("#--name=Ada&--tiles=16&--human".split(['#', '&'])).unwrap();

        assert!(!args.solo);
        assert_eq!(args.game.name, "Ada");
        assert_eq!(args.game.tiles, 16);
        assert!(args.game.human);
        assert_eq!(args.game.server, game::DEFAULT_SERVER);
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::try_parse_from("".split(['#', '&'])).unwrap();

        assert_eq!(args.game.name, "Player");
        assert_eq!(args.game.tiles, 20);
        assert!(!args.game.human);
    }

    #[test]
    fn out_of_range_tiles_and_empty_name_are_rejected() {
        for hash in ["#--tiles=0", "#--tiles=100000", "#--name="] {
            assert!(Args::try_parse_from(hash.split(['#', '&'])).is_err(), "{}", hash);
        }
    }
}
