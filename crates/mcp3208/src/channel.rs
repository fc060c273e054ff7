/// ADC 入力チャンネル
///
/// MCP3208 は8本のアナログ入力を持ち、チャンネル番号は下位3ビットのみが
/// 意味を持ちます。範囲外の値はマスクされます (8 は 0 と同じ扱い)。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Channel(u8);

impl Channel {
    pub const CH0: Channel = Channel(0);
    pub const CH1: Channel = Channel(1);
    pub const CH2: Channel = Channel(2);
    pub const CH3: Channel = Channel(3);
    pub const CH4: Channel = Channel(4);
    pub const CH5: Channel = Channel(5);
    pub const CH6: Channel = Channel(6);
    pub const CH7: Channel = Channel(7);

    /// チャンネル番号を3ビットにマスクして作成
    pub const fn new(index: u8) -> Self {
        Self(index & 0x07)
    }

    /// チャンネル番号 (0-7)
    pub const fn index(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Channel {
    fn from(index: u8) -> Self {
        Self::new(index)
    }
}
