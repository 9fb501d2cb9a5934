//! Example questions for when curiosity runs dry.

use rand::seq::SliceRandom;

/// Pool of example questions shown as inspiration.
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "如果时间静止了，光还会移动吗？",
    "为什么我们可以想象不存在的颜色？",
    "梦境里的逻辑是自洽的吗？",
    "数学是发明的还是发现的？",
    "如果你把自己复制一份，那是你吗？",
    "为什么热水比冷水结冰快？",
    "镜子里的你和真实的你是一样的吗？",
    "为什么宇宙是黑色的？",
    "既视感（Déjà vu）是怎么产生的？",
    "如果没有语言，我们还能思考吗？",
    "为什么星期一感觉比星期五更长？",
    "意识可以被上传到电脑吗？",
    "为什么我们喜欢听悲伤的音乐？",
    "如果全人类同时跳跃，地球会震动吗？",
    "我们看到的是同一个红色吗？",
];

/// Pick `count` distinct example questions at random.
pub fn sample(count: usize) -> Vec<&'static str> {
    let mut rng = rand::thread_rng();
    EXAMPLE_QUESTIONS
        .choose_multiple(&mut rng, count.min(EXAMPLE_QUESTIONS.len()))
        .copied()
        .collect()
}
