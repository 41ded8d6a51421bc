mod common;

use common::{cohort, enroll, memory_storage, pay};
use rust_sms_next::progression::{Clearance, ProgressionRules, PromoteCohortOutcome};

const Y1: &str = "1st Year";
const Y2: &str = "2nd Year";
const S2: &str = "2nd Semester";
const S3: &str = "3rd Semester";

#[tokio::test]
async fn test_underpaid_cohort_is_blocked_without_changes() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.Com.").await.unwrap();
    let from_batch = storage.create_batch("2024-25", course.id).await.unwrap();
    let to_batch = storage.create_batch("2025-26", course.id).await.unwrap();

    let paid = enroll(
        &storage,
        "Asha",
        course.id,
        from_batch.id,
        Y1,
        S2,
        Some(5000.0),
    )
    .await;
    let partial = enroll(
        &storage,
        "Ravi",
        course.id,
        from_batch.id,
        Y1,
        S2,
        Some(5000.0),
    )
    .await;
    let unpaid = enroll(
        &storage,
        "Meena",
        course.id,
        from_batch.id,
        Y1,
        S2,
        Some(5000.0),
    )
    .await;
    pay(&storage, paid, 5000.0, "2025-01-10").await;
    pay(&storage, partial, 4000.0, "2025-01-10").await;

    let from = cohort(from_batch.id, Y1, S2);
    let to = cohort(to_batch.id, Y2, S3);

    let outcome = storage.promote_cohort(&from, &to).await.unwrap();
    assert_eq!(
        outcome,
        PromoteCohortOutcome::Blocked {
            blocking_ids: vec![partial, unpaid]
        }
    );

    // 没有任何学生被移动
    let remaining = storage.list_students_by_cohort(&from).await.unwrap();
    assert_eq!(remaining.len(), 3);
    assert!(storage.list_students_by_cohort(&to).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cleared_cohort_moves_and_others_stay() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.Sc.").await.unwrap();
    let from_batch = storage.create_batch("2024-25", course.id).await.unwrap();
    let to_batch = storage.create_batch("2025-26", course.id).await.unwrap();

    let a = enroll(
        &storage,
        "Asha",
        course.id,
        from_batch.id,
        Y1,
        S2,
        Some(1000.0),
    )
    .await;
    let b = enroll(
        &storage,
        "Ravi",
        course.id,
        from_batch.id,
        Y1,
        S2,
        Some(0.0),
    )
    .await;
    // 同批次不同学期，不属于该班组
    let other = enroll(
        &storage,
        "Meena",
        course.id,
        from_batch.id,
        Y1,
        "1st Semester",
        Some(1000.0),
    )
    .await;
    pay(&storage, a, 600.0, "2025-01-10").await;
    pay(&storage, a, 400.0, "2025-02-10").await;

    let from = cohort(from_batch.id, Y1, S2);
    let to = cohort(to_batch.id, Y2, S3);

    let outcome = storage.promote_cohort(&from, &to).await.unwrap();
    assert_eq!(outcome, PromoteCohortOutcome::Promoted { promoted_count: 2 });

    let moved = storage.list_students_by_cohort(&to).await.unwrap();
    let moved_ids: Vec<i64> = moved.iter().map(|s| s.id).collect();
    assert_eq!(moved_ids, vec![a, b]);

    let untouched = storage.get_student_by_id(other).await.unwrap().unwrap();
    assert_eq!(untouched.batch_id, from_batch.id);
    assert_eq!(untouched.semester.as_deref(), Some("1st Semester"));
}

#[tokio::test]
async fn test_empty_cohort_promotes_nobody() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.A.").await.unwrap();
    let batch = storage.create_batch("2024-25", course.id).await.unwrap();

    let outcome = storage
        .promote_cohort(&cohort(batch.id, Y1, S2), &cohort(batch.id, Y2, S3))
        .await
        .unwrap();
    assert_eq!(outcome, PromoteCohortOutcome::Promoted { promoted_count: 0 });
}

#[tokio::test]
async fn test_exact_payment_clears_and_one_short_blocks() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.Com.").await.unwrap();
    let batch = storage.create_batch("2024-25", course.id).await.unwrap();
    let next = storage.create_batch("2025-26", course.id).await.unwrap();

    let student = enroll(&storage, "Asha", course.id, batch.id, Y1, S2, Some(10000.0)).await;
    pay(&storage, student, 9999.0, "2025-03-01").await;

    let from = cohort(batch.id, Y1, S2);
    let to = cohort(next.id, Y2, S3);

    assert_eq!(
        storage.check_cohort_clearance(&from).await.unwrap(),
        Clearance::Blocked(vec![student])
    );
    assert_eq!(
        storage.promote_cohort(&from, &to).await.unwrap(),
        PromoteCohortOutcome::Blocked {
            blocking_ids: vec![student]
        }
    );

    pay(&storage, student, 1.0, "2025-03-02").await;
    assert_eq!(storage.sum_payments_for(student).await.unwrap(), 10000.0);
    assert!(storage.check_cohort_clearance(&from).await.unwrap().is_cleared());
    assert_eq!(
        storage.promote_cohort(&from, &to).await.unwrap(),
        PromoteCohortOutcome::Promoted { promoted_count: 1 }
    );

    let promoted = storage.get_student_by_id(student).await.unwrap().unwrap();
    assert_eq!(promoted.batch_id, next.id);
    assert_eq!(promoted.year.as_deref(), Some(Y2));
    assert_eq!(promoted.semester.as_deref(), Some(S3));
}

#[tokio::test]
async fn test_passout_deletes_cohort_and_keeps_ledger() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.A.").await.unwrap();
    let batch = storage.create_batch("2022-23", course.id).await.unwrap();

    // 毕业不做缴费校验
    let graduate = enroll(
        &storage,
        "Asha",
        course.id,
        batch.id,
        "3rd Year",
        "6th Semester",
        Some(9000.0),
    )
    .await;
    let junior = enroll(
        &storage,
        "Ravi",
        course.id,
        batch.id,
        Y2,
        "4th Semester",
        Some(9000.0),
    )
    .await;
    pay(&storage, graduate, 3000.0, "2024-06-01").await;

    let deleted = storage
        .passout_cohort(&cohort(batch.id, "3rd Year", "6th Semester"))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    assert!(storage.get_student_by_id(graduate).await.unwrap().is_none());
    assert!(storage.get_student_by_id(junior).await.unwrap().is_some());

    let ledger = storage.list_fee_payments(graduate).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].amount, 3000.0);
}

#[tokio::test]
async fn test_promote_all_sweep() {
    let storage = memory_storage().await;
    let bcom = storage.create_course("B.Com.").await.unwrap();
    let btech = storage.create_course("B.Tech.").await.unwrap();
    let mba = storage.create_course("M.B.A.").await.unwrap();

    let bcom_24 = storage.create_batch("2024-25", bcom.id).await.unwrap();
    let bcom_25 = storage.create_batch("2025-26", bcom.id).await.unwrap();
    let btech_22 = storage.create_batch("2022-23", btech.id).await.unwrap();
    let mba_24 = storage.create_batch("2024-25", mba.id).await.unwrap();
    let odd = storage.create_batch("Evening", bcom.id).await.unwrap();

    // B.Com. 1st Year 升入 2nd Year，批次推进到已存在的 2025-26
    let fresher = enroll(&storage, "Asha", bcom.id, bcom_24.id, Y1, S2, None).await;
    // B.Com. 3rd Year 学制已满，毕业删除
    let finalist = enroll(
        &storage,
        "Ravi",
        bcom.id,
        bcom_24.id,
        "3rd Year",
        "6th Semester",
        None,
    )
    .await;
    // B.Tech. 学制 4 年，3rd Year 仍然升级；2023-24 批次不存在，批次保持不变
    let engineer = enroll(
        &storage,
        "Kiran",
        btech.id,
        btech_22.id,
        "3rd Year",
        "6th Semester",
        None,
    )
    .await;
    // 未登记课程按默认学制 3 年处理
    let manager = enroll(
        &storage,
        "Meena",
        mba.id,
        mba_24.id,
        "3rd Year",
        "5th Semester",
        None,
    )
    .await;
    // 年级不在词表中，跳过
    let outsider = enroll(
        &storage,
        "Dev",
        bcom.id,
        odd.id,
        "Final Year",
        "Sem I",
        None,
    )
    .await;

    let summary = storage
        .promote_all(&ProgressionRules::default())
        .await
        .unwrap();
    assert_eq!(summary.promoted_count, 2);
    assert_eq!(summary.passout_count, 2);

    let asha = storage.get_student_by_id(fresher).await.unwrap().unwrap();
    assert_eq!(asha.year.as_deref(), Some(Y2));
    assert_eq!(asha.semester.as_deref(), Some(S3));
    assert_eq!(asha.batch_id, bcom_25.id);

    assert!(storage.get_student_by_id(finalist).await.unwrap().is_none());
    assert!(storage.get_student_by_id(manager).await.unwrap().is_none());

    let kiran = storage.get_student_by_id(engineer).await.unwrap().unwrap();
    assert_eq!(kiran.year.as_deref(), Some("4th Year"));
    assert_eq!(kiran.semester.as_deref(), Some("7th Semester"));
    assert_eq!(kiran.batch_id, btech_22.id);

    let dev = storage.get_student_by_id(outsider).await.unwrap().unwrap();
    assert_eq!(dev.year.as_deref(), Some("Final Year"));
    assert_eq!(dev.batch_id, odd.id);
}

#[tokio::test]
async fn test_final_label_below_duration_keeps_year() {
    let storage = memory_storage().await;
    let course = storage.create_course("B.Arch.").await.unwrap();
    let batch = storage.create_batch("2021-22", course.id).await.unwrap();

    let rules = ProgressionRules::new(
        [("B.Arch.".to_string(), 5)].into_iter().collect(),
        3,
        rust_sms_next::progression::rules::default_year_order(),
        rust_sms_next::progression::rules::default_semester_order(),
    )
    .unwrap();

    let student = enroll(
        &storage,
        "Asha",
        course.id,
        batch.id,
        "4th Year",
        "8th Semester",
        None,
    )
    .await;

    let summary = storage.promote_all(&rules).await.unwrap();
    assert_eq!(summary.promoted_count, 1);
    assert_eq!(summary.passout_count, 0);

    let asha = storage.get_student_by_id(student).await.unwrap().unwrap();
    assert_eq!(asha.year.as_deref(), Some("4th Year"));
    assert_eq!(asha.semester.as_deref(), Some("8th Semester"));
}
