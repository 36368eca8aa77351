use super::render;
use crate::{
    Result,
    gateway::GatewayError,
    session::{ChatSession, Outcome},
    theme::{Theme, ThemeStore},
};
use std::io::Write;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    ToggleTheme,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "/theme" => Command::ToggleTheme,
            "/help" | "/?" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            cmd if cmd.starts_with('/') && !cmd.contains(char::is_whitespace) => {
                Command::Unknown(cmd.to_string())
            }
            _ => Command::Send(line.to_string()),
        }
    }
}

/// Terminal front end: one event loop over input lines and backend replies.
pub struct App {
    session: ChatSession,
    theme: Theme,
    themes: ThemeStore,
    rendered: usize,
}

impl App {
    pub fn new(session: ChatSession, theme: Theme, themes: ThemeStore) -> Self {
        Self {
            session,
            theme,
            themes,
            rendered: 0,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Runs until `/quit` or end of input. On end of input an outstanding
    /// request is still awaited so its reply is shown. The startup health
    /// check runs alongside input and never holds it up.
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let (outcomes_tx, mut outcomes) = mpsc::channel::<Outcome>(1);
        let mut changes = self.session.store().subscribe();
        let mut buf = Vec::new();

        let backend = self.session.backend();
        let health = async move { backend.health().await };
        tokio::pin!(health);
        let mut health_pending = true;

        self.redraw(out)?;

        loop {
            tokio::select! {
                biased;

                result = &mut health, if health_pending => {
                    health_pending = false;
                    if let Err(e) = result {
                        self.report_unreachable(&e, out)?;
                    }
                }
                Ok(()) = changes.changed() => {
                    self.render_new(out)?;
                }
                Some(outcome) = outcomes.recv() => {
                    self.session.complete(outcome)?;
                }
                read = input.read_until(b'\n', &mut buf) => {
                    let closed = read? == 0;
                    if !buf.is_empty() {
                        let raw = std::mem::take(&mut buf);
                        if !self.handle_line(&raw, &outcomes_tx, out).await? {
                            break;
                        }
                    }
                    if closed {
                        debug!("Input closed");
                        if self.session.is_busy() {
                            if let Some(outcome) = outcomes.recv().await {
                                self.session.complete(outcome)?;
                                self.render_new(out)?;
                            }
                        }
                        break;
                    }
                }
            }
            out.flush()?;
        }

        out.flush()?;
        info!(
            "Chat ended after {} messages",
            self.session.store().len()
        );
        Ok(())
    }

    /// Acts on one raw input line. Returns `false` when the user quits.
    async fn handle_line<W: Write>(
        &mut self,
        raw: &[u8],
        outcomes_tx: &mpsc::Sender<Outcome>,
        out: &mut W,
    ) -> Result<bool> {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(e) => {
                warn!("Skipping input line that is not UTF-8: {}", e);
                let palette = self.theme.palette();
                render::notice(out, &palette, "Input was not valid UTF-8 and was ignored")?;
                render::footer(out, &palette, self.session.is_busy())?;
                return Ok(true);
            }
        };

        match Command::parse(line) {
            Command::Quit => return Ok(false),
            Command::Help => {
                render::help(out, &self.theme.palette())?;
                render::footer(out, &self.theme.palette(), self.session.is_busy())?;
            }
            Command::ToggleTheme => {
                self.theme = match self.themes.toggle(self.theme).await {
                    Ok(next) => next,
                    Err(e) => {
                        warn!("Failed to persist theme: {}", e);
                        self.theme.toggled()
                    }
                };
                self.redraw(out)?;
            }
            Command::Unknown(cmd) => {
                let palette = self.theme.palette();
                render::notice(out, &palette, &format!("Unknown command {cmd}, try /help"))?;
                render::footer(out, &palette, self.session.is_busy())?;
            }
            Command::Send(text) => self.send(&text, outcomes_tx, out)?,
        }
        Ok(true)
    }

    fn send<W: Write>(
        &mut self,
        text: &str,
        outcomes_tx: &mpsc::Sender<Outcome>,
        out: &mut W,
    ) -> Result<()> {
        if let Some(pending) = self.session.begin(text) {
            let backend = self.session.backend();
            let tx = outcomes_tx.clone();
            tokio::spawn(async move {
                let outcome = pending.dispatch(backend.as_ref()).await;
                if tx.send(outcome).await.is_err() {
                    debug!("Reply arrived after the chat closed");
                }
            });
        } else if self.session.is_busy() {
            let palette = self.theme.palette();
            render::notice(out, &palette, "Still waiting for the previous reply...")?;
            render::footer(out, &palette, true)?;
        } else {
            render::prompt(out, &self.theme.palette())?;
        }
        Ok(())
    }

    fn report_unreachable<W: Write>(&self, err: &GatewayError, out: &mut W) -> Result<()> {
        warn!("Chat backend health check failed: {}", err);
        let palette = self.theme.palette();
        render::notice_in(
            out,
            palette.accent,
            &format!("Backend is not reachable ({err}). Messages may fail until it is up."),
        )?;
        render::footer(out, &palette, self.session.is_busy())?;
        Ok(())
    }

    fn redraw<W: Write>(&mut self, out: &mut W) -> Result<()> {
        render::transcript(
            out,
            self.theme,
            self.session.store().snapshot(),
            self.session.is_busy(),
        )?;
        self.rendered = self.session.store().len();
        out.flush()?;
        Ok(())
    }

    /// Prints messages appended since the last draw, then the footer.
    fn render_new<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let store = self.session.store();
        if store.len() == self.rendered {
            return Ok(());
        }

        let palette = self.theme.palette();
        for message in store.snapshot().skip(self.rendered) {
            render::message(out, message, &palette)?;
        }
        render::footer(out, &palette, self.session.is_busy())?;

        self.rendered = store.len();
        Ok(())
    }
}
