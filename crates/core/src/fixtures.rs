//! Built-in plan data for the education platform.
//!
//! These lists stand in for a persistent store: the tracker and the
//! priority matrix are seeded from them unless a plan file is supplied.

use chrono::NaiveDate;

use crate::feature::FeatureImpact;
use crate::id::MilestoneId;
use crate::milestone::{Milestone, MilestoneStatus};
use crate::phase::Phase;
use crate::task::{Category, DevelopmentTask, Priority};

/// Phase 1 development tasks.
pub fn phase1_tasks() -> Vec<DevelopmentTask> {
    use Category::*;
    use Priority::*;

    let task = |id: &str, title: &str, category: Category, priority: Priority, hours: f32| {
        DevelopmentTask::new(id, title, Phase::Phase1, category, priority, hours)
    };

    vec![
        task("p1-auth-validation", "完善用户注册流程验证", Backend, High, 16.0)
            .with_description("添加邮箱验证、手机验证、实名认证等功能")
            .with_tags(["authentication", "validation", "security"]),
        task("p1-login-optimization", "优化登录状态管理", Frontend, High, 12.0)
            .with_description("改进登录状态持久化、自动登录、会话管理")
            .with_dependencies(["p1-auth-validation"])
            .with_tags(["authentication", "state-management"]),
        task("p1-profile-edit", "用户个人资料编辑", Frontend, Medium, 20.0)
            .with_description("实现用户信息修改、头像上传、偏好设置")
            .with_dependencies(["p1-login-optimization"])
            .with_tags(["user-profile", "file-upload"]),
        task("p1-password-reset", "密码重置功能", Backend, Medium, 14.0)
            .with_description("邮箱重置密码、安全问题验证、密码强度检查")
            .with_dependencies(["p1-auth-validation"])
            .with_tags(["security", "password", "email"]),
        task("p1-error-handling", "错误处理和用户反馈", Frontend, High, 10.0)
            .with_description("统一错误处理、友好错误提示、操作反馈优化")
            .with_tags(["error-handling", "user-experience"]),
        task("p1-database-setup", "完善数据库连接和配置", Database, High, 8.0)
            .with_description("优化数据库连接池、环境配置、连接安全")
            .with_tags(["database", "configuration", "performance"]),
        task("p1-crud-operations", "实现数据CRUD操作", Backend, High, 24.0)
            .with_description("完善增删改查操作、事务处理、数据一致性")
            .with_dependencies(["p1-database-setup"])
            .with_tags(["database", "crud", "transactions"]),
        task("p1-data-validation", "数据验证和安全检查", Backend, High, 16.0)
            .with_description("输入验证、SQL注入防护、XSS防护")
            .with_dependencies(["p1-crud-operations"])
            .with_tags(["security", "validation", "sql-injection"]),
        task("p1-content-management", "内容管理界面", Frontend, Medium, 32.0)
            .with_description("创建内容管理后台、内容编辑器、预览功能")
            .with_dependencies(["p1-crud-operations"])
            .with_tags(["content-management", "admin", "editor"]),
        task("p1-multilingual-input", "多语言内容录入", Frontend, Medium, 28.0)
            .with_description("多语言编辑器、语言切换、内容同步")
            .with_dependencies(["p1-content-management"])
            .with_tags(["multilingual", "content", "editor"]),
    ]
}

/// Plan milestones.
pub fn milestones() -> Vec<Milestone> {
    let milestone = |id: &str, title: &str, description: &str, (y, m, d): (i32, u32, u32), criteria: &[&str]| Milestone {
        id: MilestoneId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        target_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        completion_criteria: criteria.iter().map(|c| c.to_string()).collect(),
        status: MilestoneStatus::Planning,
        progress: 0,
    };

    vec![
        milestone(
            "milestone-1",
            "基础平台稳定",
            "用户系统完全稳定，基础教学功能可用，AI功能初步集成",
            (2024, 3, 15),
            &[
                "用户注册登录流程完善",
                "基础数据管理功能完成",
                "内容管理系统可用",
                "基础UI组件稳定",
                "演示数据完整",
            ],
        ),
        milestone(
            "milestone-2",
            "核心功能完善",
            "多语言教学系统完整，奥数训练体系建立，社交学习功能上线",
            (2024, 5, 1),
            &[
                "AI智能教学系统上线",
                "多语言教学功能完整",
                "奥数竞赛系统建立",
                "社交学习功能可用",
                "学习分析系统基础版",
            ],
        ),
        milestone(
            "milestone-3",
            "平台生态成熟",
            "性能优化完成，安全性达标，国际化支持",
            (2024, 7, 1),
            &[
                "系统性能优化完成",
                "安全性增强达标",
                "国际化支持完善",
                "移动端体验优化",
                "PWA功能上线",
            ],
        ),
    ]
}

/// Phase 1 candidate features with impact ratings.
pub fn phase1_features() -> Vec<FeatureImpact> {
    let feature = |name: &str, user: u8, business: u8, complexity: u8, resource: u8, risk: u8| FeatureImpact {
        feature: name.to_string(),
        user_value: user,
        business_value: business,
        technical_complexity: complexity,
        resource_required: resource,
        risk_level: risk,
    };

    vec![
        feature("用户注册流程验证", 9, 8, 4, 3, 2),
        feature("登录状态管理优化", 8, 7, 5, 3, 3),
        feature("数据库CRUD操作", 7, 9, 6, 5, 4),
        feature("错误处理优化", 8, 6, 3, 2, 2),
        feature("内容管理系统", 6, 8, 7, 6, 5),
        feature("多语言内容录入", 7, 7, 8, 7, 6),
    ]
}
