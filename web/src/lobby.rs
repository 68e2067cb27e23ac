use memtile_core::{LobbyAction, LobbyEntry};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct LobbyProps {
    pub entries: Vec<LobbyEntry>,
    pub on_new_game: Callback<usize>,
    pub on_join: Callback<usize>,
}

#[function_component(LobbyView)]
pub(crate) fn lobby_component(props: &LobbyProps) -> Html {
    html! {
        <div class="gameSelect">
            {
                for props.entries.iter().map(|entry| {
                    let index = entry.index;
                    let status = match entry.action() {
                        Some(LobbyAction::NewGame) => {
                            let on_new_game = props.on_new_game.clone();
                            html! {
                                <button onclick={move |_| on_new_game.emit(index)}>{entry.status_label()}</button>
                            }
                        }
                        Some(LobbyAction::Join) => {
                            let on_join = props.on_join.clone();
                            html! {
                                <button class="join" onclick={move |_| on_join.emit(index)}>{"Join"}</button>
                            }
                        }
                        None => html! { <span>{entry.status_label()}</span> },
                    };
                    let size = entry.board_size.map(|size| format!("{} tiles", size));

                    html! {
                        <div class="gameLineSpace">
                            <div class="gameLine" id={format!("game{}", index)}>
                                <div class="gameStatus">{status}</div>
                                <div class="gameP1">{entry.player1.clone().unwrap_or_default()}</div>
                                <div class="gameP2">{entry.player2.clone().unwrap_or_default()}</div>
                                <div class="gameSize">{size.unwrap_or_default()}</div>
                            </div>
                        </div>
                    }
                })
            }
        </div>
    }
}
