//! Human-readable development recommendations.

use crate::matrix::PriorityMatrix;

/// Line markers for the top three features.
const TOP_MARKERS: [&str; 3] = ["🚀 立即开始", "⚡ 紧接着", "📋 第三优先"];

/// Heading printed before the strategy bullets.
pub const STRATEGY_HEADER: &str = "💡 建议策略：";

/// General strategy bullets appended after the feature lines.
pub const STRATEGY_BULLETS: [&str; 4] = [
    "- 先完成高价值、低复杂度的功能",
    "- 并行开发独立性强的模块",
    "- 预留20%时间处理意外问题",
    "- 每周进行一次优先级评估调整",
];

impl PriorityMatrix {
    /// Recommendation lines: one per top-ranked feature (at most three), a
    /// blank line, the strategy header and the four strategy bullets.
    pub fn recommendations(&self) -> Vec<String> {
        let ranked = self.ranked_features();

        let mut lines: Vec<String> = TOP_MARKERS
            .iter()
            .zip(&ranked)
            .map(|(marker, f)| {
                format!("{}：{}（优先级分数：{:.2}）", marker, f.impact.feature, f.priority_score)
            })
            .collect();

        lines.push(String::new());
        lines.push(STRATEGY_HEADER.to_string());
        lines.extend(STRATEGY_BULLETS.iter().map(|b| b.to_string()));
        lines
    }
}
