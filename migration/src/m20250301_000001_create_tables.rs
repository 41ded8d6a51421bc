use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建批次表（名称形如 2024-25）
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batches::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batches::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Batches::Name).string().not_null())
                    .col(ColumnDef::new(Batches::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Batches::Table, Batches::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::FatherName).string().null())
                    .col(ColumnDef::new(Students::Dob).string().null())
                    .col(ColumnDef::new(Students::Mobile).string().null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::Gender).string().null())
                    .col(ColumnDef::new(Students::AdmissionDate).string().null())
                    .col(ColumnDef::new(Students::Year).string().null())
                    .col(ColumnDef::new(Students::Semester).string().null())
                    .col(ColumnDef::new(Students::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Students::BatchId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Students::FeesTotal)
                            .double()
                            .null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::BatchId)
                            .to(Batches::Table, Batches::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建缴费流水表
        // student_id 不设外键：学生毕业删除后流水保留用于审计
        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeePayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeePayments::Amount).double().not_null())
                    .col(ColumnDef::new(FeePayments::Mode).string().not_null())
                    .col(ColumnDef::new(FeePayments::Date).string().not_null())
                    .col(ColumnDef::new(FeePayments::Note).text().null())
                    .col(
                        ColumnDef::new(FeePayments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batches_course_id_name")
                    .table(Batches::Table)
                    .col(Batches::CourseId)
                    .col(Batches::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_cohort")
                    .table(Students::Table)
                    .col(Students::BatchId)
                    .col(Students::Year)
                    .col(Students::Semester)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_payments_student_id")
                    .table(FeePayments::Table)
                    .col(FeePayments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_payments_date_mode")
                    .table(FeePayments::Table)
                    .col(FeePayments::Date)
                    .col(FeePayments::Mode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Batches {
    #[sea_orm(iden = "batches")]
    Table,
    Id,
    CourseId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Name,
    FatherName,
    Dob,
    Mobile,
    Email,
    Gender,
    AdmissionDate,
    Year,
    Semester,
    CourseId,
    BatchId,
    FeesTotal,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeePayments {
    #[sea_orm(iden = "fee_payments")]
    Table,
    Id,
    StudentId,
    Amount,
    Mode,
    Date,
    Note,
    CreatedAt,
}
