fn main() {
    // cfg.toml の変更時に再ビルドする
    println!("cargo:rerun-if-changed=cfg.toml");
}
