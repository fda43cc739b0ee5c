//! 阅读顺序排序 - 业务能力层
//!
//! 按（页码，纵向行带，横向位置）给全部题目排序

use crate::models::Placement;
use std::cmp::Ordering;

/// 阅读顺序排序器
///
/// 同一页内纵向位置相差不超过 `band_tolerance` 的两道题视为同一行，
/// 同一行内从左到右，否则从上到下。键相同的题目保持输入顺序。
pub struct ReadingOrderSorter {
    band_tolerance: f64,
}

impl ReadingOrderSorter {
    pub fn new(band_tolerance: f64) -> Self {
        Self { band_tolerance }
    }

    /// 两道题之间的阅读先后
    ///
    /// 带容差的比较不满足传递性，只用于相邻两项，不能交给 `sort_by`。
    pub fn compare(&self, a: &Placement, b: &Placement) -> Ordering {
        let (pa, pb) = (a.position(), b.position());
        a.problem.page.cmp(&b.problem.page).then_with(|| {
            if (pa.y - pb.y).abs() <= self.band_tolerance {
                pa.x.total_cmp(&pb.x)
            } else {
                pa.y.total_cmp(&pb.y)
            }
        })
    }

    /// 逐个插入，保证输出中任意相邻两项都不逆序
    pub fn sort(&self, placements: Vec<Placement>) -> Vec<Placement> {
        let mut by_page = placements;
        by_page.sort_by_key(|p| p.problem.page);

        let mut sorted: Vec<Placement> = Vec::with_capacity(by_page.len());
        for placement in by_page {
            let slot = self.insertion_slot(&sorted, &placement);
            sorted.insert(slot, placement);
        }
        sorted
    }

    /// 从后往前找第一个"前一项不大于、后一项不小于"的位置
    ///
    /// 这样的位置一定存在；相等时排在已有项之后。
    fn insertion_slot(&self, sorted: &[Placement], item: &Placement) -> usize {
        (0..=sorted.len())
            .rev()
            .find(|&slot| {
                let after_prev = slot == 0
                    || self.compare(&sorted[slot - 1], item) != Ordering::Greater;
                let before_next =
                    slot == sorted.len() || self.compare(&sorted[slot], item) != Ordering::Less;
                after_prev && before_next
            })
            .unwrap_or(0)
    }
}
