//! 应用程序初始化和启动
//!
//! 负责应用的完整启动流程，包括：
//! - 日志系统初始化
//! - 设置与记录库打开
//! - Actor 系统启动
//! - 启动加载（深色模式、位置列表）
//! - 终端交互循环

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::actors::CaptureStateActor;
use crate::capture::CaptureFlow;
use crate::commands;
use crate::domains::{AppearanceDomain, CaptureDomain, StorageDomain};
use crate::event_bus::EventBus;
use crate::location::{self, Geolocator, LocationProvider, PermissionGate, PermissionPrompt};
use crate::logger;
use crate::settings::SettingsManager;
use crate::storage;
use crate::theme::ThemeController;
use crate::utils;
use crate::AppState;

/// 共享的标准输入，交互循环与权限询问轮流读取
type SharedInput = Arc<Mutex<Lines<BufReader<Stdin>>>>;

/// 应用程序入口点
///
/// 1. 日志系统初始化
/// 2. 应用数据目录创建
/// 3. 领域模块初始化与 Actor 启动
/// 4. 启动加载
/// 5. 交互循环
pub fn run() {
    let app_dir = utils::get_app_data_dir();

    let _log_guard = match logger::init(&utils::get_log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("日志系统初始化失败: {}", e);
            None
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("创建运行时失败: {}", e);
            return;
        }
    };

    if let Err(e) = runtime.block_on(run_async(&app_dir)) {
        error!("应用异常退出: {:#}", e);
    }
}

async fn run_async(app_dir: &Path) -> Result<()> {
    info!("初始化位置记录应用: {:?}", app_dir);

    let input: SharedInput = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let prompt = Arc::new(TerminalPrompt {
        input: input.clone(),
    });

    let state = build_state(app_dir, prompt).await?;
    spawn_event_logger(&state);
    bootstrap(&state).await;

    print_help();
    render_state(&state).await;

    loop {
        let line = {
            let mut lines = input.lock().await;
            lines.next_line().await?
        };
        let Some(line) = line else { break };

        match line.trim() {
            "" => continue,
            "capture" | "c" => match commands::capture_location(&state).await {
                Ok(record) => println!("已保存 Location {}", record.id),
                Err(message) => println!("{}", message),
            },
            "list" | "l" => render_state(&state).await,
            "reload" => {
                if let Err(message) = commands::reload_locations(&state).await {
                    println!("{}", message);
                }
                render_state(&state).await;
            }
            "toggle" | "t" => match commands::toggle_dark_mode(&state).await {
                Ok(outcome) => {
                    println!("Dark Mode: {}", if outcome.theme.dark { "on" } else { "off" });
                    if !outcome.persisted {
                        println!("（设置未能保存）");
                    }
                }
                Err(message) => println!("{}", message),
            },
            "theme" => match commands::get_theme(&state).await {
                Ok(theme) => println!("{}", serde_json::to_string_pretty(&theme)?),
                Err(message) => println!("{}", message),
            },
            "config" => match commands::get_app_config(&state).await {
                Ok(config) => println!("{}", serde_json::to_string_pretty(&config)?),
                Err(message) => println!("{}", message),
            },
            "help" | "h" => print_help(),
            "quit" | "q" | "exit" => break,
            other => println!("未知命令: {}", other),
        }
    }

    info!("应用退出");
    Ok(())
}

/// 创建应用状态并启动 Actor
pub async fn build_state(
    app_dir: &Path,
    prompt: Arc<dyn PermissionPrompt>,
) -> Result<AppState> {
    let settings = Arc::new(SettingsManager::new(app_dir.join("settings.json")).await?);
    let config = settings.get().await;

    let repository = storage::open_repository(&config.database, app_dir).await?;
    let event_bus = Arc::new(EventBus::new(100));

    let gate = PermissionGate::new(settings.clone(), prompt);
    let source = location::fix_source_from_config(&config.location.source);
    let provider: Arc<dyn LocationProvider> = Arc::new(Geolocator::new(gate, source));

    let (state_actor, state_handle) = CaptureStateActor::new();
    tokio::spawn(async move {
        state_actor.run().await;
    });

    let flow = Arc::new(CaptureFlow::new(
        provider,
        repository.clone(),
        state_handle,
        event_bus.clone(),
        Duration::from_secs(config.location.fix_timeout_secs),
    ));
    let theme = Arc::new(ThemeController::new(settings.clone(), event_bus.clone()));

    Ok(AppState {
        capture_domain: Arc::new(CaptureDomain::new(flow)),
        storage_domain: Arc::new(StorageDomain::new(repository, settings)),
        appearance_domain: Arc::new(AppearanceDomain::new(theme)),
        event_bus,
    })
}

/// 启动加载：深色模式与位置列表互不依赖，并发读取一次
pub async fn bootstrap(state: &AppState) {
    let theme = state.appearance_domain.get_theme();
    let flow = state.capture_domain.get_flow();

    let (dark_mode, locations) = tokio::join!(theme.load_dark_mode(), flow.load_locations());

    info!("启动加载完成: 深色模式 = {}", dark_mode);
    if let Err(e) = locations {
        warn!("启动时加载位置失败: {}", e);
    }
}

/// 记录事件总线上的所有事件
fn spawn_event_logger(state: &AppState) {
    let mut events = state.event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => debug!("事件: {:?}", event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("事件监听落后，跳过 {} 条", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// 终端权限询问
///
/// 输入已关闭时没有得到答复，返回错误而不是当作拒绝，避免保存一个用户从未做出的决定
struct TerminalPrompt<R> {
    input: Arc<Mutex<Lines<R>>>,
}

#[async_trait]
impl<R> PermissionPrompt for TerminalPrompt<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn ask(&self) -> Result<bool> {
        println!("Allow location access? [y/N]");
        let mut lines = self.input.lock().await;
        let Some(answer) = lines.next_line().await? else {
            bail!("标准输入已关闭，未获得权限答复");
        };
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

fn print_help() {
    println!("commands: capture | list | reload | toggle | theme | config | help | quit");
}

async fn render_state(state: &AppState) {
    let Ok(snapshot) = commands::get_capture_state(state).await else {
        return;
    };

    if snapshot.is_loading() {
        println!("...");
    }
    if let Some(message) = snapshot.error_message() {
        println!("{}", message);
    }
    for record in snapshot.locations() {
        println!("Location {}", record.id);
        println!(
            "  Latitude: {} | Longitude: {}",
            record.latitude, record.longitude
        );
    }
}
