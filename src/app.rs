use crate::api::Api;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::{self, Handler as TerminalEventHandler};
use crate::logger::LogBuffer;
use crate::state::State;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    api: Api,
    state: Arc<Mutex<State>>,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, log_buffer: LogBuffer) -> Result<()> {
        info!("Starting application...");
        let (access_token, base_url) = config.credentials().map_err(AppError::from)?;
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let app = App {
            api: Api::new(&access_token, &base_url),
            state: Arc::new(Mutex::new(State::new(tx, log_buffer, config.theme()))),
        };
        app.start_network(rx)?;
        app.start_ui().await?;
        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations. Each event
    /// is handled in its own task so slow requests never hold up later ones.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> AppResult<()> {
        debug!("Creating new thread for asynchronous networking...");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;
        let network_event_handler =
            NetworkEventHandler::new(Arc::clone(&self.state), self.api.clone());
        std::thread::spawn(move || {
            runtime.block_on(async {
                while let Ok(network_event) = net_receiver.recv() {
                    let handler = network_event_handler.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handler.handle(network_event).await {
                            error!("Failed to handle network event: {}", e);
                        }
                    });
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        enable_raw_mode().map_err(|e| AppError::Terminal(e.to_string()))?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        self.state.lock().await.load_lists();
        let result = self.run(&mut terminal).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    /// Draw, then wait for the next terminal event and route it to the state
    /// current at that moment.
    ///
    async fn run<B: Backend>(&self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            {
                let mut state = self.state.lock().await;
                terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            }
            let event = terminal_event_handler
                .next()
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            let mut state = self.state.lock().await;
            if !terminal::handle(&mut state, event) {
                debug!("Received application exit request.");
                return Ok(());
            }
        }
    }
}
