//! # Application Controller
//!
//! Runs the console event loop. Two event sources feed it: lines of user
//! input and completions of service calls. Both are consumed one at a time
//! on the same task, so the view model never sees concurrent access.

use crate::dashboard::commands::{DashboardCommand, HELP_TEXT};
use crate::dashboard::services::{RecordService, ServiceCompletion};
use crate::dashboard::view_model::DashboardViewModel;
use crate::dashboard::views::TextRenderer;
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

enum LoopEvent {
    Input(Option<String>),
    Completion(ServiceCompletion),
}

pub struct AppController<S, R, W>
where
    S: RecordService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    view_model: DashboardViewModel<S>,
    renderer: TextRenderer<W>,
    input: Lines<R>,
    settle_after_command: bool,
    should_quit: bool,
}

impl<S, R, W> AppController<S, R, W>
where
    S: RecordService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(view_model: DashboardViewModel<S>, input: R, output: W) -> Self {
        Self {
            view_model,
            renderer: TextRenderer::new(output),
            input: input.lines(),
            settle_after_command: false,
            should_quit: false,
        }
    }

    /// Wait for every request a command started before reading the next
    /// line. Used when input is scripted rather than typed.
    pub fn with_settle_after_command(mut self, settle: bool) -> Self {
        self.settle_after_command = settle;
        self
    }

    pub fn view_model(&self) -> &DashboardViewModel<S> {
        &self.view_model
    }

    pub fn into_output(self) -> W {
        self.renderer.into_inner()
    }

    pub async fn run(&mut self) -> Result<()> {
        self.view_model.mount();
        if self.settle_after_command {
            self.view_model.run_until_idle().await;
        }
        self.render_pending()?;

        while !self.should_quit {
            let outstanding = self.view_model.has_outstanding_requests();
            let event = tokio::select! {
                line = self.input.next_line() => LoopEvent::Input(line?),
                Some(completion) = self.view_model.next_completion(), if outstanding => {
                    LoopEvent::Completion(completion)
                }
            };

            match event {
                LoopEvent::Input(Some(line)) => {
                    tracing::debug!("Input: {:?}", line);
                    self.handle_line(&line)?;
                    if self.settle_after_command && !self.should_quit {
                        self.view_model.run_until_idle().await;
                    }
                }
                LoopEvent::Input(None) => {
                    tracing::debug!("Input closed, finishing outstanding requests");
                    self.view_model.run_until_idle().await;
                    self.should_quit = true;
                }
                LoopEvent::Completion(completion) => {
                    self.view_model.handle_completion(completion);
                }
            }

            self.render_pending()?;
        }

        tracing::info!("Dashboard controller stopped");
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let command = match line.parse::<DashboardCommand>() {
            Ok(command) => command,
            Err(e) => {
                self.renderer.write_line(&format!("! {e} (type 'help')"))?;
                return Ok(());
            }
        };

        let vm = &mut self.view_model;
        match command {
            DashboardCommand::NextPage => {
                vm.next_page();
            }
            DashboardCommand::PrevPage => {
                vm.prev_page();
            }
            DashboardCommand::GoTo(page_index) => {
                vm.go_to(page_index);
            }
            DashboardCommand::Refresh => vm.refresh(),
            DashboardCommand::New => vm.open_for_new(),
            DashboardCommand::Edit(id) => {
                if let Err(e) = vm.open_for_edit(id) {
                    self.renderer.write_line(&format!("! {e}"))?;
                }
            }
            DashboardCommand::Set { field, value } => {
                if !vm.set_field(&field, &value) {
                    let reason = if vm.draft().active {
                        format!("unknown field '{field}'")
                    } else {
                        "no record is being edited".to_string()
                    };
                    self.renderer.write_line(&format!("! {reason}"))?;
                }
            }
            DashboardCommand::Submit => {
                // Content errors are already shown inside the form
                if let Err(e) = vm.submit() {
                    if vm.draft().error.is_none() {
                        self.renderer.write_line(&format!("! {e}"))?;
                    }
                }
            }
            DashboardCommand::Cancel => vm.cancel(),
            DashboardCommand::Delete(id) => {
                if !vm.delete(id) {
                    self.renderer
                        .write_line(&format!("! delete of record {id} is already in progress"))?;
                }
            }
            DashboardCommand::Help => self.renderer.write_line(HELP_TEXT)?,
            DashboardCommand::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn render_pending(&mut self) -> Result<()> {
        let events = self.view_model.collect_pending_view_events();
        self.renderer.render_events(&self.view_model, &events)
    }
}
