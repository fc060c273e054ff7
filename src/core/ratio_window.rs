/// 系列モデルに渡す比の個数
pub const WINDOW_LEN: usize = 8;

/// サンプリング順に Rs/R0 比を蓄積する固定長ウィンドウ
///
/// 8個そろった時点で中身を返して空に戻ります（重なりなし）。
#[derive(Debug, Clone, Default)]
pub struct RatioWindow {
    ratios: [f32; WINDOW_LEN],
    len: usize,
}

impl RatioWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 比を追加し、ウィンドウが満たされたらその内容を返します
    pub fn push(&mut self, ratio: f32) -> Option<[f32; WINDOW_LEN]> {
        self.ratios[self.len] = ratio;
        self.len += 1;

        if self.len == WINDOW_LEN {
            self.len = 0;
            Some(self.ratios)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
