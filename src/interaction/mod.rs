//! Delegated click handling for rendered markdown.
//!
//! The host routes every interaction inside the rendered container here.
//! Resolution is synchronous and reads the mounted markup; the side effects
//! (clipboard, file save, authenticated download) run asynchronously and
//! never report failure to the caller.

mod export;
mod host;
mod http;
mod mount;

use std::future::Future;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use scraper::{ElementRef, Selector};

use crate::config::{Config, DownloadsConfig, TablesConfig};
use crate::html::{TABLE_ACTION_ATTR, TABLE_ID_ATTR};

pub use export::{csv_field, to_csv, to_tsv};
pub use host::{Blob, Browser, Clipboard, Fetcher, LocalStore, MemoryStore, ObjectUrl};
pub use http::HttpFetcher;
pub use mount::MountedView;

use mount::closest;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("table selector must parse"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("row selector must parse"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("cell selector must parse"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableActionKind {
    Copy,
    ExportCsv,
}

impl TableActionKind {
    fn from_attr(value: &str) -> Option<Self> {
        match value {
            "copy" => Some(Self::Copy),
            "csv" => Some(Self::ExportCsv),
            _ => None,
        }
    }
}

/// A toolbar action with the grid read from the displayed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAction {
    pub kind: TableActionKind,
    pub table_id: String,
    pub grid: Vec<Vec<String>>,
}

/// A link to fetch with the stored bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub href: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Table(TableAction),
    Download(DownloadRequest),
}

/// Result of resolving an interaction target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The host must cancel the default navigation.
    pub prevent_default: bool,
    pub interaction: Option<Interaction>,
}

/// Result of [`InteractionHandler::handle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handled {
    pub prevent_default: bool,
    /// `None` when the target was not an interaction.
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Clipboard,
    Selection,
}

/// What a performed interaction did. Failures are already logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Copied(CopyPath),
    CopyFailed,
    Exported(ObjectUrl),
    Opened(ObjectUrl),
    DownloadFailed,
}

/// Host capabilities used by the [`InteractionHandler`].
#[derive(Clone)]
pub struct Hosts {
    pub clipboard: Arc<dyn Clipboard>,
    pub browser: Arc<dyn Browser>,
    pub fetcher: Arc<dyn Fetcher>,
    pub store: Arc<dyn LocalStore>,
}

pub struct InteractionHandler {
    hosts: Hosts,
    tables: TablesConfig,
    downloads: DownloadsConfig,
}

impl InteractionHandler {
    pub fn new(hosts: Hosts, config: &Config) -> Self {
        Self {
            hosts,
            tables: config.tables.clone(),
            downloads: config.downloads.clone(),
        }
    }

    /// Resolve a click on `target`.
    ///
    /// Table toolbar buttons take precedence over links. Anything else
    /// resolves to an empty [`Dispatch`] and the default action proceeds.
    pub fn on_interaction_event(&self, target: ElementRef<'_>) -> Dispatch {
        if let Some(control) = closest(target, |el| el.value().attr(TABLE_ACTION_ATTR).is_some()) {
            return match self.table_action(control) {
                Some(action) => {
                    tracing::debug!(table = %action.table_id, kind = ?action.kind, "table action");
                    Dispatch {
                        prevent_default: false,
                        interaction: Some(Interaction::Table(action)),
                    }
                }
                None => Dispatch::default(),
            };
        }

        let href = closest(target, |el| el.value().name() == "a")
            .and_then(|anchor| anchor.value().attr("href"));
        match href {
            Some(href) if self.downloads.is_authenticated_download(href) => {
                let token = self.hosts.store.get_item(&self.downloads.token_key);
                tracing::debug!(href, authorized = token.is_some(), "intercepted download link");
                Dispatch {
                    prevent_default: true,
                    interaction: Some(Interaction::Download(DownloadRequest {
                        href: href.to_string(),
                        token,
                    })),
                }
            }
            _ => Dispatch::default(),
        }
    }

    fn table_action(&self, control: ElementRef<'_>) -> Option<TableAction> {
        let kind = TableActionKind::from_attr(control.value().attr(TABLE_ACTION_ATTR)?)?;
        let container = closest(control, |el| el.value().attr(TABLE_ID_ATTR).is_some())?;
        let table = container.select(&TABLE).next()?;
        let grid = table
            .select(&ROW)
            .map(|row| {
                row.select(&CELL)
                    .map(|cell| cell.text().collect::<String>().trim().to_string())
                    .collect()
            })
            .collect();
        Some(TableAction {
            kind,
            table_id: container.value().attr(TABLE_ID_ATTR)?.to_string(),
            grid,
        })
    }

    /// Resolve `target` and run its side effect to completion.
    ///
    /// Hosts that must cancel navigation before the side effect finishes
    /// use [`dispatch`](Self::dispatch) instead.
    pub async fn handle(&self, target: ElementRef<'_>) -> Handled {
        let Dispatch {
            prevent_default,
            interaction,
        } = self.on_interaction_event(target);
        let outcome = match interaction {
            Some(interaction) => Some(self.perform(interaction).await),
            None => None,
        };
        Handled {
            prevent_default,
            outcome,
        }
    }

    /// Resolve `target`, start its side effect in the background and return
    /// whether the host must cancel the default navigation.
    pub fn dispatch(self: &Arc<Self>, target: ElementRef<'_>) -> bool {
        let Dispatch {
            prevent_default,
            interaction,
        } = self.on_interaction_event(target);
        if let Some(interaction) = interaction {
            self.spawn(interaction);
        }
        prevent_default
    }

    /// Run the side effect of a resolved interaction.
    ///
    /// Works on any executor. Object-URL revocation is scheduled on the
    /// current tokio runtime; without one the URL is left alive.
    pub async fn perform(&self, interaction: Interaction) -> Outcome {
        match interaction {
            Interaction::Table(action) => match action.kind {
                TableActionKind::Copy => self.copy(&to_tsv(&action.grid)).await,
                TableActionKind::ExportCsv => self.export_csv(&to_csv(&action.grid)),
            },
            Interaction::Download(request) => self.download(&request).await,
        }
    }

    /// Run `interaction` on the current tokio runtime without waiting.
    /// Outside a runtime the interaction is dropped with a warning.
    pub fn spawn(self: &Arc<Self>, interaction: Interaction) {
        let handler = Arc::clone(self);
        spawn_detached("interaction", async move {
            handler.perform(interaction).await;
        });
    }

    async fn copy(&self, text: &str) -> Outcome {
        let clipboard = &self.hosts.clipboard;
        match clipboard.write_text(text).await {
            Ok(()) => Outcome::Copied(CopyPath::Clipboard),
            Err(e) => {
                tracing::debug!(error = %e, "clipboard write failed, using selection copy");
                match clipboard.copy_via_selection(text) {
                    Ok(()) => Outcome::Copied(CopyPath::Selection),
                    Err(e) => {
                        tracing::debug!(error = %e, "selection copy failed");
                        Outcome::CopyFailed
                    }
                }
            }
        }
    }

    fn export_csv(&self, csv: &str) -> Outcome {
        let browser = &self.hosts.browser;
        let url = browser.create_object_url(Blob {
            bytes: csv.as_bytes().to_vec(),
            mime: self.tables.csv_mime.clone(),
        });
        browser.save_as(&url, &self.tables.csv_file_name);
        self.revoke_later(url.clone(), self.tables.csv_url_ttl());
        Outcome::Exported(url)
    }

    async fn download(&self, request: &DownloadRequest) -> Outcome {
        match self.hosts.fetcher.fetch(request).await {
            Ok(blob) => {
                let browser = &self.hosts.browser;
                let url = browser.create_object_url(blob);
                browser.open_in_new_context(&url);
                self.revoke_later(url.clone(), self.downloads.object_url_ttl());
                Outcome::Opened(url)
            }
            Err(e) => {
                tracing::warn!(href = %request.href, error = %e, "download failed");
                Outcome::DownloadFailed
            }
        }
    }

    /// Revoke `url` once the grace period has passed, whether or not the
    /// consumer has finished with it.
    fn revoke_later(&self, url: ObjectUrl, after: Duration) {
        let browser = Arc::clone(&self.hosts.browser);
        spawn_detached("revoke object url", async move {
            tokio::time::sleep(after).await;
            browser.revoke_object_url(&url);
            tracing::trace!(%url, "revoked object url");
        });
    }
}

fn spawn_detached<F>(task: &'static str, future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn(future);
        }
        Err(_) => tracing::warn!(task, "no tokio runtime, background task skipped"),
    }
}
