use hashbrown::HashMap;

use crate::lobby::LobbyView;
use crate::socket::WebSocketTransport;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use memtile_core::{
    Deferred, MAX_TILES, Result, Session, SessionConfig, SessionStatus, SessionUpdate, SlotState,
    TransportEvent,
};
use yew::prelude::*;

pub(crate) const DEFAULT_SERVER: &str = "wss://127.0.0.1:8088/game/";

/// Css class for a tile, `item-fade` and `locked` are added on top.
fn slot_class(state: SlotState) -> &'static str {
    use SlotState::*;
    match state {
        FaceDown => "faceDown",
        FaceUpSelf => "faceUpRed",
        FaceUpOpponent => "faceUpBlue",
        Removed => "empty",
    }
}

fn status_label(status: SessionStatus) -> &'static str {
    use SessionStatus::*;
    match status {
        Unconnected => "Not connected",
        Connected => "Pick a game",
        Waiting => "Waiting for an opponent",
        Playing => "Playing",
        Finished => "Game over",
    }
}

pub(crate) enum Msg {
    Socket(TransportEvent),
    NewGame(usize),
    JoinGame(usize),
    Flip(usize),
    Resolve(u64, Deferred),
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    index: usize,
    state: SlotState,
    display: AttrValue,
    #[prop_or_default]
    fading: bool,
    #[prop_or_default]
    locked: bool,
    callback: Callback<usize>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        index,
        state,
        display,
        fading,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(slot_class(state));
    if fading {
        class.push("item-fade");
    }
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div class="tilespace">
            <img id={format!("tile{}", index)} {class} src={display} {onclick}/>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Game server endpoint
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub(crate) server: String,

    /// Name announced to the other players
    #[arg(short, long, default_value = "Player", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub(crate) name: String,

    /// Number of tiles to request for a new game
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(2..=i64::from(MAX_TILES)))]
    pub(crate) tiles: u32,

    /// Play against another human instead of the server's bot
    #[arg(long)]
    pub(crate) human: bool,
}

impl GameProps {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            board_size: self.tiles,
            opponent_is_bot: !self.human,
            player_name: self.name.clone(),
        }
    }
}

pub(crate) struct GameView {
    session: Session<WebSocketTransport>,
    timers: HashMap<u64, Timeout>,
    next_timer: u64,
}

impl GameView {
    fn dispatch(&mut self, msg: Msg) -> Result<SessionUpdate> {
        use Msg::*;

        match msg {
            Socket(event) => self.session.handle_transport(event),
            NewGame(index) => {
                self.session.request_new_game(index)?;
                self.cancel_timers();
                Ok(SessionUpdate::Redraw)
            }
            JoinGame(index) => {
                self.session.request_join_game(index)?;
                self.cancel_timers();
                Ok(SessionUpdate::Redraw)
            }
            Flip(tile) => {
                self.session.request_flip(tile)?;
                Ok(SessionUpdate::NoChange)
            }
            Resolve(id, deferred) => {
                self.timers.remove(&id);
                Ok(if self.session.resolve(deferred) {
                    SessionUpdate::Redraw
                } else {
                    SessionUpdate::NoChange
                })
            }
        }
    }

    fn schedule(&mut self, ctx: &Context<Self>, deferred: Deferred) {
        let id = self.next_timer;
        self.next_timer += 1;

        let link = ctx.link().clone();
        let timeout = Timeout::new(deferred.delay_ms(), move || {
            link.send_message(Msg::Resolve(id, deferred))
        });
        self.timers.insert(id, timeout);
    }

    fn cancel_timers(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("dropping {} pending resolutions", self.timers.len());
            self.timers.clear();
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let transport =
            WebSocketTransport::connect(&props.server, ctx.link().callback(Msg::Socket))
                .unwrap_or_else(|err| {
                    log::error!("could not open socket to {}: {:?}", props.server, err);
                    WebSocketTransport::unavailable()
                });

        Self {
            session: Session::new(transport, props.session_config()),
            timers: HashMap::new(),
            next_timer: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match self.dispatch(msg) {
            Ok(SessionUpdate::Schedule(deferred)) => {
                self.schedule(ctx, deferred);
                true
            }
            Ok(update) => update.has_update(),
            Err(err) => {
                report(&err);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = self.session.status();
        let pairs_removed = self
            .session
            .board()
            .map_or(0, |board| board.removed_count() / 2);

        let on_new_game = ctx.link().callback(Msg::NewGame);
        let on_join = ctx.link().callback(Msg::JoinGame);

        html! {
            <div class="memtile">
                <nav>
                    <aside>{status_label(status)}</aside>
                    <aside>{format!("{} pairs removed", pairs_removed)}</aside>
                </nav>
                if status.can_start_game() {
                    <LobbyView entries={self.session.lobby().to_vec()} {on_new_game} {on_join}/>
                }
                if let Some(board) = self.session.board() {
                    <div class="grid">
                        {
                            for board.slots().iter().enumerate().map(|(index, slot)| {
                                let callback = ctx.link().callback(Msg::Flip);
                                html! {
                                    <TileView
                                        {index}
                                        state={slot.state()}
                                        display={AttrValue::from(slot.display_ref().to_string())}
                                        fading={slot.is_fading()}
                                        locked={!board.is_clickable(index)}
                                        {callback}
                                    />
                                }
                            })
                        }
                    </div>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memtile_core::TileBoard;

    #[test]
    fn slot_classes_follow_owner_and_removal() {
        let mut board = TileBoard::new(4);
        board.apply_flip(0, "static/Mao150.png", true).unwrap();
        board.apply_flip(1, "static/Mao150.png", false).unwrap();

        let classes: Vec<_> = board
            .slots()
            .iter()
            .map(|slot| slot_class(slot.state()))
            .collect();
        assert_eq!(classes, vec!["faceUpRed", "faceUpBlue", "faceDown", "faceDown"]);

        board.apply_remove(0, 1).unwrap();
        assert!(board.slots()[0].is_fading());
        assert_eq!(slot_class(board.slots()[0].state()), "faceUpRed");
    }

    #[test]
    fn removed_slot_renders_empty() {
        let mut board = TileBoard::new(2);
        board.apply_flip(0, "static/Mao150.png", true).unwrap();
        board.apply_flip(1, "static/Mao150.png", true).unwrap();
        let deferred = board.apply_remove(0, 1).unwrap();

        assert!(board.resolve(deferred));
        assert_eq!(slot_class(board.slots()[1].state()), "empty");
        assert!(!board.is_clickable(1));
    }

    #[test]
    fn game_props_map_to_session_config() {
        let props = GameProps {
            server: DEFAULT_SERVER.to_string(),
            name: "Ada".to_string(),
            tiles: 16,
            human: true,
        };

        assert_eq!(
            props.session_config(),
            SessionConfig {
                board_size: 16,
                opponent_is_bot: false,
                player_name: "Ada".to_string(),
            }
        );
    }

    #[test]
    fn every_status_has_a_label() {
        use SessionStatus::*;
        for status in [Unconnected, Connected, Waiting, Playing, Finished] {
            assert!(!status_label(status).is_empty());
        }
    }
}
