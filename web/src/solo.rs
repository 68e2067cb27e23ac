use crate::utils::js_random_seed;
use gloo::timers::callback::Timeout;
use memtile_core::{CHECK_DELAY_MS, MatchOutcome, SoloGame, SoloOutcome, SoloState};
use yew::prelude::*;

pub(crate) enum Msg {
    Flip(usize),
    Check,
    Restart,
}

/// Offline game, no socket is opened.
pub(crate) struct SoloView {
    game: SoloGame,
    last_outcome: Option<MatchOutcome>,
    _pending_check: Option<Timeout>,
}

impl SoloView {
    fn result_text(&self) -> String {
        match (self.game.state(), self.last_outcome) {
            (SoloState::Won, _) => "Congrats".to_string(),
            (SoloState::Playing, Some(MatchOutcome::Match)) => {
                format!("You found a match! Score: {}", self.game.pairs_won())
            }
            (SoloState::Playing, Some(MatchOutcome::NoMatch)) => {
                format!("No match. Score: {}", self.game.pairs_won())
            }
            (SoloState::Playing, None) => format!("Score: {}", self.game.pairs_won()),
        }
    }
}

impl Component for SoloView {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            game: SoloGame::new(js_random_seed()),
            last_outcome: None,
            _pending_check: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(index) => match self.game.flip(index) {
                SoloOutcome::CheckPending => {
                    let link = ctx.link().clone();
                    self._pending_check = Some(Timeout::new(CHECK_DELAY_MS, move || {
                        link.send_message(Check)
                    }));
                    true
                }
                outcome => outcome.has_update(),
            },
            Check => {
                self._pending_check = None;
                self.last_outcome = self.game.check_match();
                log::debug!("solo check: {:?}", self.last_outcome);
                self.last_outcome.is_some()
            }
            Restart => {
                self._pending_check = None;
                self.last_outcome = None;
                self.game = SoloGame::new(js_random_seed());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_restart = ctx.link().callback(|_| Msg::Restart);

        html! {
            <div class="memtile solo">
                <nav>
                    <aside id="result">{self.result_text()}</aside>
                    <span><button onclick={cb_restart}>{"New Game"}</button></span>
                </nav>
                <div class="grid">
                    {
                        for (0..self.game.len()).filter_map(|index| {
                            let src = self.game.display_at(index)?;
                            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::Flip(index));
                            Some(html! {
                                <div class="tilespace">
                                    <img data-id={index.to_string()} {src} {onclick}/>
                                </div>
                            })
                        })
                    }
                </div>
            </div>
        }
    }
}
