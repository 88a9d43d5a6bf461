use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_materials_table::Migration),
            Box::new(m20240101_000002_create_warehouses_table::Migration),
            Box::new(m20240101_000003_create_inventory_tables::Migration),
            Box::new(m20240101_000004_create_projects_table::Migration),
            Box::new(m20240101_000005_create_assignment_tables::Migration),
            Box::new(m20240101_000006_create_crew_assignments_table::Migration),
            Box::new(m20240101_000007_create_attendance_table::Migration),
            Box::new(m20240101_000008_create_forum_tables::Migration),
            Box::new(m20240101_000009_create_users_table::Migration),
        ]
    }
}

mod m20240101_000001_create_materials_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_materials_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Materials::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Materials::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Materials::Name).string().not_null())
                        .col(ColumnDef::new(Materials::Description).string().not_null())
                        .col(ColumnDef::new(Materials::Category).string().not_null())
                        .col(ColumnDef::new(Materials::Unit).string().not_null())
                        .col(ColumnDef::new(Materials::Barcode).string().null())
                        .col(ColumnDef::new(Materials::ImageUrl).string().null())
                        .col(ColumnDef::new(Materials::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Materials::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_materials_name")
                        .table(Materials::Table)
                        .col(Materials::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            // NULL barcodes never collide; non-empty ones must be unique.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_materials_barcode")
                        .table(Materials::Table)
                        .col(Materials::Barcode)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Materials::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Materials {
        Table,
        Id,
        Name,
        Description,
        Category,
        Unit,
        Barcode,
        ImageUrl,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_warehouses_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_warehouses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Warehouses::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(ColumnDef::new(Warehouses::Location).string().not_null())
                        .col(ColumnDef::new(Warehouses::Phone).string().not_null())
                        .col(ColumnDef::new(Warehouses::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Warehouses::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_warehouses_name")
                        .table(Warehouses::Table)
                        .col(Warehouses::Name)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Warehouses {
        Table,
        Id,
        Name,
        Location,
        Phone,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_inventory_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryEntries::MaterialId).uuid().not_null())
                        .col(ColumnDef::new(InventoryEntries::WarehouseId).uuid().not_null())
                        .col(
                            ColumnDef::new(InventoryEntries::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(InventoryEntries::EnteredBy).string().not_null())
                        .col(
                            ColumnDef::new(InventoryEntries::EnteredAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryEntries::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_entries_material_id")
                        .table(InventoryEntries::Table)
                        .col(InventoryEntries::MaterialId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_entries_warehouse_id")
                        .table(InventoryEntries::Table)
                        .col(InventoryEntries::WarehouseId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryAdjustments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryAdjustments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryAdjustments::EntryId).uuid().not_null())
                        .col(ColumnDef::new(InventoryAdjustments::Delta).integer().not_null())
                        .col(
                            ColumnDef::new(InventoryAdjustments::QuantityAfter)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::AdjustedBy)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryAdjustments::Reason).string().null())
                        .col(
                            ColumnDef::new(InventoryAdjustments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_adjustments_entry_id")
                        .table(InventoryAdjustments::Table)
                        .col(InventoryAdjustments::EntryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryAdjustments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryEntries {
        Table,
        Id,
        MaterialId,
        WarehouseId,
        Quantity,
        EnteredBy,
        EnteredAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryAdjustments {
        Table,
        Id,
        EntryId,
        Delta,
        QuantityAfter,
        AdjustedBy,
        Reason,
        CreatedAt,
    }
}

mod m20240101_000004_create_projects_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_projects_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Projects::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Projects::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Projects::Title).string().not_null())
                        .col(ColumnDef::new(Projects::Description).string().not_null())
                        .col(
                            ColumnDef::new(Projects::ContractingCompany)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Projects::StartDate).date().not_null())
                        .col(ColumnDef::new(Projects::EndDate).date().not_null())
                        .col(ColumnDef::new(Projects::Budget).big_integer().not_null())
                        .col(ColumnDef::new(Projects::Activities).json().not_null())
                        .col(ColumnDef::new(Projects::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Projects::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_projects_end_date")
                        .table(Projects::Table)
                        .col(Projects::EndDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Projects::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Projects {
        Table,
        Id,
        Title,
        Description,
        ContractingCompany,
        StartDate,
        EndDate,
        Budget,
        Activities,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_assignment_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_assignment_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProjectAssignments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProjectAssignments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProjectAssignments::ProjectId).uuid().not_null())
                        .col(
                            ColumnDef::new(ProjectAssignments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_project_assignments_project_id")
                        .table(ProjectAssignments::Table)
                        .col(ProjectAssignments::ProjectId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AssignmentLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AssignmentLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AssignmentLines::AssignmentId).uuid().not_null())
                        .col(
                            ColumnDef::new(AssignmentLines::InventoryEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AssignmentLines::QuantityAssigned)
                                .integer()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_assignment_lines_assignment_id")
                        .table(AssignmentLines::Table)
                        .col(AssignmentLines::AssignmentId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_assignment_lines_inventory_entry_id")
                        .table(AssignmentLines::Table)
                        .col(AssignmentLines::InventoryEntryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AssignmentLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProjectAssignments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ProjectAssignments {
        Table,
        Id,
        ProjectId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum AssignmentLines {
        Table,
        Id,
        AssignmentId,
        InventoryEntryId,
        QuantityAssigned,
    }
}

mod m20240101_000006_create_crew_assignments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_crew_assignments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CrewAssignments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CrewAssignments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CrewAssignments::ProjectId).uuid().not_null())
                        .col(ColumnDef::new(CrewAssignments::Participants).json().not_null())
                        .col(ColumnDef::new(CrewAssignments::Status).string().not_null())
                        .col(
                            ColumnDef::new(CrewAssignments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CrewAssignments::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CrewAssignments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum CrewAssignments {
        Table,
        Id,
        ProjectId,
        Participants,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_attendance_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_attendance_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AttendanceRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AttendanceRecords::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AttendanceRecords::Rut).string().not_null())
                        .col(
                            ColumnDef::new(AttendanceRecords::CheckIn)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AttendanceRecords::CheckOut).timestamp().null())
                        .col(
                            ColumnDef::new(AttendanceRecords::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_attendance_records_rut")
                        .table(AttendanceRecords::Table)
                        .col(AttendanceRecords::Rut)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_attendance_records_check_in")
                        .table(AttendanceRecords::Table)
                        .col(AttendanceRecords::CheckIn)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum AttendanceRecords {
        Table,
        Id,
        Rut,
        CheckIn,
        CheckOut,
        CreatedAt,
    }
}

mod m20240101_000008_create_forum_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_forum_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ForumPosts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(ForumPosts::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(ForumPosts::Title).string().not_null())
                        .col(ColumnDef::new(ForumPosts::Content).string().not_null())
                        .col(ColumnDef::new(ForumPosts::Author).string().not_null())
                        .col(ColumnDef::new(ForumPosts::ImageUrl).string().null())
                        .col(ColumnDef::new(ForumPosts::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(ForumPosts::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_forum_posts_author")
                        .table(ForumPosts::Table)
                        .col(ForumPosts::Author)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ForumComments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ForumComments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ForumComments::PostId).uuid().not_null())
                        .col(ColumnDef::new(ForumComments::Author).string().not_null())
                        .col(ColumnDef::new(ForumComments::Content).string().not_null())
                        .col(ColumnDef::new(ForumComments::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_forum_comments_post_id")
                        .table(ForumComments::Table)
                        .col(ForumComments::PostId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ForumComments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ForumPosts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ForumPosts {
        Table,
        Id,
        Title,
        Content,
        Author,
        ImageUrl,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ForumComments {
        Table,
        Id,
        PostId,
        Author,
        Content,
        CreatedAt,
    }
}

mod m20240101_000009_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Username).string().not_null())
                        .col(ColumnDef::new(Users::Rut).string().not_null())
                        .col(ColumnDef::new(Users::Email).string().not_null())
                        .col(ColumnDef::new(Users::Roles).json().not_null())
                        .col(ColumnDef::new(Users::PhotoUrl).string().null())
                        .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_rut")
                        .table(Users::Table)
                        .col(Users::Rut)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        Username,
        Rut,
        Email,
        Roles,
        PhotoUrl,
        CreatedAt,
        UpdatedAt,
    }
}
