use anyhow::anyhow;
use log::{error, info};
use rppal::gpio::Gpio;

use mq3_gas_monitor::core::{AppConfig, AppController, DetectionMode};
use mq3_gas_monitor::hardware::{AlarmIndicator, PiOutputPin, PiSpiBus, StdDelay};
use mq3_gas_monitor::inference::RatioHeuristicModel;
use mq3_gas_monitor::Mcp3208;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("MQ-3 ガスモニター v{} を起動します", mq3_gas_monitor::VERSION);

    // 設定はサンプリング開始前に検証する
    let app_config = AppConfig::load().map_err(|e| {
        error!("設定の読み込みに失敗しました: {}", e);
        anyhow!("設定エラー: {}", e)
    })?;
    info!(
        "設定: CH{} R0={}Ω モード={:?}",
        app_config.adc_channel.index(),
        app_config.baseline.ohms(),
        app_config.detection_mode
    );

    let gpio = Gpio::new().map_err(|e| anyhow!("GPIOの初期化に失敗しました: {}", e))?;

    let spi = PiSpiBus::open(app_config.spi_clock_hz, app_config.transfer_timeout)
        .map_err(|e| anyhow!("SPIの初期化に失敗しました: {}", e))?;
    let chip_select = PiOutputPin::open_high(&gpio, app_config.chip_select_gpio)?;
    let adc = Mcp3208::new(spi, chip_select)
        .map_err(|e| anyhow!("MCP3208の初期化に失敗しました: {}", e))?;

    let led = PiOutputPin::open_low(&gpio, app_config.led_gpio)?;
    let buzzer = PiOutputPin::open_low(&gpio, app_config.buzzer_gpio)?;
    let indicator = AlarmIndicator::new(led, buzzer, app_config.buzzer_enabled)?;

    let mut controller = AppController::new(&app_config, adc, indicator);
    let mut delay = StdDelay;

    match app_config.detection_mode {
        DetectionMode::Threshold => controller.run_threshold(&mut delay, None),
        DetectionMode::Sequence => {
            let mut model = RatioHeuristicModel::new(app_config.thresholds.critical_ratio());
            controller.run_sequence(&mut model, &mut delay, None);
        }
    }

    Ok(())
}
