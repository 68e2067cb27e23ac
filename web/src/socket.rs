use gloo::events::EventListener;
use memtile_core::{Transport, TransportError, TransportEvent};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CloseEvent, MessageEvent, WebSocket};
use yew::Callback;

/// [`Transport`] over a browser WebSocket, forwarding socket events into a yew callback.
pub(crate) struct WebSocketTransport {
    socket: Option<WebSocket>,
    _listeners: Vec<EventListener>,
}

impl WebSocketTransport {
    pub(crate) fn connect(url: &str, on_event: Callback<TransportEvent>) -> Result<Self, JsValue> {
        let socket = WebSocket::new(url)?;
        log::info!("attempting connection to {}", url);

        let on_open = {
            let on_event = on_event.clone();
            EventListener::new(&socket, "open", move |_| on_event.emit(TransportEvent::Opened))
        };

        let on_message = {
            let on_event = on_event.clone();
            EventListener::new(&socket, "message", move |event| {
                let text = event
                    .dyn_ref::<MessageEvent>()
                    .and_then(|event| event.data().as_string());
                match text {
                    Some(text) => on_event.emit(TransportEvent::Received(text)),
                    None => log::warn!("ignoring non-text frame"),
                }
            })
        };

        let on_close = {
            let on_event = on_event.clone();
            EventListener::new(&socket, "close", move |event| {
                let reason = event
                    .dyn_ref::<CloseEvent>()
                    .map(|event| format!("code {} {}", event.code(), event.reason()))
                    .unwrap_or_else(|| "closed".to_string());
                on_event.emit(TransportEvent::Closed(reason));
            })
        };

        let on_error = EventListener::new(&socket, "error", move |event| {
            log::debug!("socket error event: {:?}", event.type_());
            on_event.emit(TransportEvent::Errored("socket error".to_string()));
        });

        Ok(Self {
            socket: Some(socket),
            _listeners: vec![on_open, on_message, on_close, on_error],
        })
    }

    /// A transport that never opens, for when the socket could not even be created.
    pub(crate) fn unavailable() -> Self {
        Self {
            socket: None,
            _listeners: Vec::new(),
        }
    }
}

impl Transport for WebSocketTransport {
    fn is_open(&self) -> bool {
        self.socket
            .as_ref()
            .is_some_and(|socket| socket.ready_state() == WebSocket::OPEN)
    }

    fn send(&mut self, frame: &str) -> Result<(), TransportError> {
        let Some(socket) = self.socket.as_ref() else {
            return Err(TransportError::NotOpen);
        };
        socket
            .send_with_str(frame)
            .map_err(|err| TransportError::SendFailed(format!("{:?}", err)))
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        if let Some(socket) = self.socket.take() {
            if let Err(err) = socket.close() {
                log::error!("failed to close socket: {:?}", err);
            }
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn unavailable_transport_refuses_to_send() {
        let mut transport = WebSocketTransport::unavailable();

        assert!(!transport.is_open());
        assert_eq!(transport.send("FlipTile{\"Idx\":0}"), Err(TransportError::NotOpen));
    }

    #[wasm_bindgen_test]
    fn connecting_socket_is_not_open_yet() {
        let transport = WebSocketTransport::connect("ws://127.0.0.1:9/game/", Callback::noop())
            .expect("socket url is valid");

        assert!(!transport.is_open());
    }

    #[wasm_bindgen_test]
    fn invalid_url_is_rejected() {
        assert!(WebSocketTransport::connect("not a url", Callback::noop()).is_err());
    }
}
