// gpsd 定位来源
//
// 通过 TCP 连接 gpsd，开启 JSON 监听后取第一条有效的 TPV 报告

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, trace};

use super::{Fix, FixSource};

/// gpsd 默认端口
pub const GPSD_DEFAULT_PORT: u16 = 2947;

const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\n";

/// gpsd 报告（只解析需要的字段）
#[derive(Debug, Deserialize)]
struct GpsdReport {
    class: String,
    #[serde(default)]
    mode: u8,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// 解析一行 gpsd 输出
///
/// 只有 mode >= 2（2D/3D 定位）且带坐标的 TPV 报告才算有效定位
pub fn parse_tpv(line: &str) -> Option<Fix> {
    let report: GpsdReport = serde_json::from_str(line).ok()?;
    if report.class != "TPV" || report.mode < 2 {
        return None;
    }
    Some(Fix {
        latitude: report.lat?,
        longitude: report.lon?,
    })
}

/// gpsd 定位来源
pub struct GpsdFixSource {
    host: String,
    port: u16,
}

impl GpsdFixSource {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }
}

#[async_trait]
impl FixSource for GpsdFixSource {
    async fn current_fix(&self) -> Result<Fix> {
        let addr = format!("{}:{}", self.host, self.port);
        let mut stream = TcpStream::connect(&addr)
            .await
            .with_context(|| format!("无法连接 gpsd: {}", addr))?;
        debug!("已连接 gpsd: {}", addr);

        stream.write_all(WATCH_COMMAND).await?;

        let mut lines = BufReader::new(stream).lines();
        while let Some(line) = lines.next_line().await? {
            trace!("gpsd: {}", line);
            if let Some(fix) = parse_tpv(&line) {
                return Ok(fix);
            }
        }

        bail!("gpsd 连接在获得定位前关闭")
    }
}
